// CAUTION: DO NOT EDIT
// Tests rely on the line numbers in this file.
// This file is read as text and never compiled.

fn test_comments(is: Is) {
    let a = 1;
    // just a comment
    is.that(a == get_b()); // should be 1
    is.that(a == get_b());
    let res = fetch("coins");
    is.no_err(res); // fetch error
    is.equal(
        a,
        get_b(),
    ); /* block */
}

fn get_b() -> i32 {
    1
}
