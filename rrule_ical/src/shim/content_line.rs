//! A single iCalendar content line, `NAME[;param=value[;...]]:VALUE`,
//! already unfolded by the caller (line unfolding is the higher-level
//! document model's job, out of scope here).

/// One `param=value` pair. Quoted values keep `;`/`:` literal inside the
/// quotes; the stored value has the surrounding quotes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub value: String,
}

impl ContentLine {
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|param| param.name.eq_ignore_ascii_case(name))
            .map(|param| param.value.as_str())
    }

    /// Parses a single content line. Returns `None` for anything malformed
    /// — a malformed line is skipped by the caller, never a hard error;
    /// the shim is deliberately lenient.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return None;
        }

        let (head, value) = split_unquoted(line, ':')?;
        let mut segments = head.split(';');
        let name = segments.next()?.trim();

        if name.is_empty() {
            return None;
        }

        let mut parameters = Vec::new();
        for segment in segments {
            let (param_name, param_value) = split_unquoted(segment, '=')?;
            let param_value = param_value.trim();
            let unquoted = param_value
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(param_value);

            parameters.push(Parameter {
                name: param_name.trim().to_ascii_uppercase(),
                value: unquoted.to_string(),
            });
        }

        Some(ContentLine {
            name: name.to_ascii_uppercase(),
            parameters,
            value: value.to_string(),
        })
    }
}

/// Splits `input` on the first unquoted occurrence of `delimiter`. A
/// double-quote toggles "inside a quoted span", during which the
/// delimiter is treated as a literal character (RFC 5545 §3.2's
/// quoted-string param values).
fn split_unquoted(input: &str, delimiter: char) -> Option<(&str, &str)> {
    let mut in_quotes = false;

    for (index, ch) in input.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                return Some((&input[..index], &input[index + c.len_utf8()..]));
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_property() {
        let line = ContentLine::parse("DTSTART:19970902T090000").unwrap();

        assert_eq!(line.name, "DTSTART");
        assert!(line.parameters.is_empty());
        assert_eq!(line.value, "19970902T090000");
    }

    #[test]
    fn parses_tzid_parameter() {
        let line = ContentLine::parse("DTSTART;TZID=America/New_York:19970902T090000").unwrap();

        assert_eq!(line.parameter("TZID"), Some("America/New_York"));
        assert_eq!(line.value, "19970902T090000");
    }

    #[test]
    fn quoted_parameter_value_keeps_colon_literal() {
        let line =
            ContentLine::parse(r#"ATTACH;FMTTYPE="text/plain":http://example.com/a:b"#).unwrap();

        assert_eq!(line.parameter("FMTTYPE"), Some("text/plain"));
        assert_eq!(line.value, "http://example.com/a:b");
    }

    #[test]
    fn malformed_line_is_skipped() {
        assert!(ContentLine::parse("NOCOLONHERE").is_none());
        assert!(ContentLine::parse("").is_none());
    }
}
