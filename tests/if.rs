#[macro_use]
mod common;

#[cfg(test)]
mod _if {
    tests! {
        if_else in if is OK
        "yes"
        "no"
        "then"
        "else"
    }

    tests! {
        truthiness in if is OK
        "zero is truthy"
        "empty string is truthy"
        "nil is falsy"
    }

    tests! {
        dangling_else in if is OK
        "inner else"
    }

    tests! {
        missing_paren in if is ERR
        "[line 1] Error at 'true': Expect '(' after 'if'"
    }
}
