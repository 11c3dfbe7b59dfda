#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        literals in string is OK
        "hello"
        ""
        "with spaces"
    }

    tests! {
        concatenation in string is OK
        "hi there"
    }

    tests! {
        multiline in string is OK
        "line one"
        "line two"
        "2"
    }

    tests! {
        unterminated in string is ERR
        "[line 1] Error: Unterminated string"
    }
}
