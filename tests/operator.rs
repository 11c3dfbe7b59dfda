#[macro_use]
mod common;

#[cfg(test)]
mod operator {
    tests! {
        add in operator is OK
        "3"
        "579"
        "string"
    }

    tests! {
        arithmetic in operator is OK
        "5"
        "12"
        "2.5"
        "-2"
    }

    tests! {
        comparison in operator is OK
        "true"
        "true"
        "false"
        "true"
        "false"
    }

    tests! {
        equals in operator is OK
        "true"
        "true"
        "false"
        "true"
        "false"
        "false"
        "false"
        "false"
    }

    tests! {
        not_equals in operator is OK
        "true"
        "false"
        "true"
    }

    tests! {
        evaluation_order in operator is OK
        "left"
        "right"
        "3"
    }

    tests! {
        add_mismatch in operator is ERR
        "[line 1] Error at '+': Binary operation '+' is not supported between boolean type and nil type"
    }

    tests! {
        subtract_mismatch in operator is ERR
        "[line 1] Error at '-': Binary operation '-' is not supported between string type and number type"
    }

    tests! {
        comparison_mismatch in operator is ERR
        "[line 1] Error at '<': Binary operation '<' is not supported between string type and string type"
    }

    tests! {
        divide_by_zero in operator is ERR
        "[line 1] Error at '/': Cannot divide by zero"
    }
}
