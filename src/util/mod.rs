pub mod cli;

use std::fmt::Display;

pub fn list_display(list: &[impl Display]) -> String {
    if list.len() == 1 {
        list[0].to_string()
    } else if list.len() == 2 {
        format!("{} and {}", list[0], list[1])
    } else {
        let mut display = String::new();
        for (idx, item) in list.iter().enumerate() {
            let formatted = if idx + 1 == list.len() {
                // this is the last item
                format!("and {}", item)
            } else {
                format!("{}, ", item)
            };
            display.push_str(&formatted);
        }
        display
    }
}

/// Length in bytes of the longest prefix shared by every string in the
/// slice. Comparison is byte-exact, not locale-aware; the result is clamped
/// back to a character boundary so it's always safe to slice with.
pub fn common_prefix_len(strings: &[impl AsRef<str>]) -> usize {
    let mut iter = strings.iter();
    let first = match iter.next() {
        Some(first) => first.as_ref(),
        None => return 0,
    };
    let mut len = first.len();
    for string in iter {
        let string = string.as_ref();
        len = first.as_bytes()[..len.min(string.len())]
            .iter()
            .zip(string.as_bytes())
            .take_while(|(a, b)| a == b)
            .count();
    }
    while !first.is_char_boundary(len) {
        len -= 1;
    }
    len
}
