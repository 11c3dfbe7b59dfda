#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        associativity in assignment is OK
        "c"
        "c"
        "c"
    }

    tests! {
        returns_value in assignment is OK
        "2"
        "2"
    }

    tests! {
        grouping in assignment is ERR
        "[line 2] Error at '=': Invalid assignment target"
    }

    tests! {
        prefix_operator in assignment is ERR
        "[line 2] Error at '=': Invalid assignment target"
    }

    tests! {
        infix_operator in assignment is ERR
        "[line 3] Error at '=': Invalid assignment target"
    }
}
