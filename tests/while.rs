#[macro_use]
mod common;

#[cfg(test)]
mod _while {
    tests! {
        count_up in while is OK
        "0"
        "1"
        "2"
    }

    tests! {
        false_condition in while is OK
        "done"
    }

    tests! {
        missing_paren in while is ERR
        "[line 1] Error at 'true': Expect '(' after 'while'"
    }
}
