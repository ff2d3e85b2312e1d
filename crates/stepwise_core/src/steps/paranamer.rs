//! Parameter name introspection for step methods.
//!
//! Step methods are identified by signature strings such as
//! `fn a_car(colour: String, speed: u32)`. An introspector recovers the
//! declared parameter names when a step definition does not name them.

use std::fmt::Debug;

/// Recovers declared parameter names from a step method signature.
pub trait Paranamer: Debug + Send + Sync {
    fn lookup_parameter_names(&self, signature: &str) -> Vec<String>;
}

/// Introspection switched off: never reports names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullParanamer;

impl Paranamer for NullParanamer {
    fn lookup_parameter_names(&self, _signature: &str) -> Vec<String> {
        Vec::new()
    }
}

/// Reads names from the parenthesised argument list of a signature.
///
/// Receivers (`self`, `&self`, `&mut self`) and `mut` bindings are skipped;
/// commas inside generic or tuple types do not split arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureParanamer;

impl Paranamer for SignatureParanamer {
    fn lookup_parameter_names(&self, signature: &str) -> Vec<String> {
        let Some(open) = signature.find('(') else {
            return Vec::new();
        };
        let Some(close) = signature.rfind(')') else {
            return Vec::new();
        };
        if close <= open {
            return Vec::new();
        }

        split_top_level(&signature[open + 1..close])
            .into_iter()
            .filter_map(|argument| {
                let (name, _) = argument.split_once(':')?;
                let name = name.trim();
                let name = name.strip_prefix("mut ").unwrap_or(name).trim();
                (!name.is_empty() && name != "_").then(|| name.to_string())
            })
            .collect()
    }
}

fn split_top_level(arguments: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in arguments.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(arguments[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(arguments[start..].trim());
    parts.into_iter().filter(|part| !part.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::{NullParanamer, Paranamer, SignatureParanamer};

    #[test]
    fn null_paranamer_reports_nothing() {
        assert!(NullParanamer
            .lookup_parameter_names("fn a(colour: String)")
            .is_empty());
    }

    #[test]
    fn signature_paranamer_reads_declared_names() {
        let names = SignatureParanamer.lookup_parameter_names(
            "fn a_car(&mut self, colour: String, mut speed: u32, tags: HashMap<String, u32>)",
        );
        assert_eq!(names, vec!["colour", "speed", "tags"]);
    }

    #[test]
    fn signature_without_arguments_or_parens() {
        assert!(SignatureParanamer
            .lookup_parameter_names("fn nothing()")
            .is_empty());
        assert!(SignatureParanamer
            .lookup_parameter_names("given_a_car")
            .is_empty());
        assert_eq!(
            SignatureParanamer.lookup_parameter_names("fn skip(_: u8, name: &str)"),
            vec!["name"]
        );
    }
}
