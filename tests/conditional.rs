#[macro_use]
mod common;

#[cfg(test)]
mod conditional {
    tests! {
        basic in conditional is OK
        "yes"
        "no"
    }

    tests! {
        truthiness in conditional is OK
        "zero"
        "empty"
        "nil"
    }

    tests! {
        right_associative in conditional is OK
        "b"
    }

    tests! {
        nested in conditional is OK
        "B"
    }

    tests! {
        with_assignment in conditional is OK
        "1"
    }

    tests! {
        lazy in conditional is OK
        "then"
        "then"
    }

    tests! {
        missing_colon in conditional is ERR
        "[line 1] Error at ';': Expect ':' after then branch of conditional"
    }

    tests! {
        missing_condition in conditional is ERR
        "[line 1] Error at '?': Missing expression before '?'"
    }
}
