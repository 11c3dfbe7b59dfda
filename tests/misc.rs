#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        empty_file in misc is OK
    }

    tests! {
        precedence in misc is OK
        "14"
        "8"
        "4"
        "0"
        "true"
        "true"
        "true"
        "true"
        "0"
        "0"
        "0"
        "0"
        "4"
    }

    tests! {
        unexpected_character in misc is ERR
        "[line 2] Error: Unexpected character '|'"
    }

    tests! {
        missing_operand in misc is ERR
        "[line 1] Error at '==': Missing expression before '=='"
    }

    tests! {
        missing_operand_plus in misc is ERR
        "[line 1] Error at '+': Missing expression before '+'"
    }
}
