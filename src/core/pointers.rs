//! References instead of raw pointers: the borrow checker plays the part
//! of the nil check and the `*` operator reads through the borrow.

pub fn decr(number: &mut i64) {
    *number -= 1;
}

/// Runs the lesson and returns the lines it would print.
pub fn walkthrough() -> Vec<String> {
    let mut lines = Vec::new();
    let mut number: i64 = 43;

    // 尚未指向任何東西
    let number_ref: Option<&i64> = None;
    if number_ref.is_none() {
        lines.push("initialize null".to_string());
    }

    let number_ref = &number;
    lines.push(format!("{}", *number_ref));
    lines.push(format!("{:p}", number_ref));

    number += 1;
    lines.push(format!("{}", number));
    // 修改後重新借用，讀到的是同一塊記憶體
    let number_ref = &number;
    lines.push(format!("{}", *number_ref));

    decr(&mut number);
    lines.push(format!("{}", number));

    lines
}
