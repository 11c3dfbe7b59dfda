#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        early in return is OK
        "positive"
        "non-positive"
    }

    tests! {
        nil in return is OK
        "nil"
    }

    tests! {
        in_while in return is OK
        "5"
    }

    tests! {
        after_return in return is OK
        "returned"
    }

    tests! {
        top_level in return is ERR
        "[line 1] Error at 'return': Cannot return from top-level code."
    }
}
