//! Identifier casing helpers.
//!
//! Design names are written by humans ("divider", "div_by_zero",
//! "DivideRequest", "list-bottles"); generators need them in one consistent
//! shape. All helpers split on `_`, `-`, `.`, whitespace and on lower→upper
//! case boundaries.

/// Split a name into lower-cased words.
fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // "divideRequest" and the "S" in "HTTPServer" both start a word
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "div_by_zero" -> "DivByZero")
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "div_by_zero" -> "divByZero")
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert a string to snake_case (e.g., "DivideRequest" -> "divide_request")
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

/// Convert a string to kebab-case (e.g., "DivideRequest" -> "divide-request")
pub fn to_kebab_case(s: &str) -> String {
    words(s).join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("divide"), "Divide");
        assert_eq!(to_pascal_case("div_by_zero"), "DivByZero");
        assert_eq!(to_pascal_case("list-bottles"), "ListBottles");
        assert_eq!(to_pascal_case("DivideRequest"), "DivideRequest");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Divider"), "divider");
        assert_eq!(to_snake_case("DivideRequest"), "divide_request");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("my service"), "my_service");
        assert_eq!(to_snake_case("a__b"), "a_b");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("div_by_zero"), "divByZero");
        assert_eq!(to_camel_case("DivideRequest"), "divideRequest");
    }

    #[test]
    fn test_to_kebab_case() {
        assert_eq!(to_kebab_case("invalid_arguments"), "invalid-arguments");
        assert_eq!(to_kebab_case("DivideRequest"), "divide-request");
    }

    #[test]
    fn test_digits_stay_attached() {
        assert_eq!(to_snake_case("int64"), "int64");
        assert_eq!(to_pascal_case("v2_api"), "V2Api");
    }
}
