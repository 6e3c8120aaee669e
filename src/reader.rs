use crate::error::{EdnError, ReaderError};
use crate::value::{self, Value};
use chrono::DateTime;
use miette::NamedSource;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::sync::Arc;

/// A single-pass recursive-descent reader for EDN text.
///
/// The reader owns the input buffer and a byte-offset cursor; every
/// sub-reader advances the cursor as a side effect and hands back only the
/// value it constructed. There is no separate lexer stage. `None` results
/// mean "no value here": end of input, an unconsumed closing delimiter, or a
/// consumed comment.
///
/// The grammar is read permissively, matching what a well-behaved producer
/// emits rather than validating exhaustively. Recursion depth is bounded
/// only by input nesting depth, so callers handing the reader untrusted
/// input should bound input size themselves.
#[derive(Debug)]
pub struct Reader<'a> {
    source: Arc<NamedSource<String>>,
    input: &'a str,
    pos: usize,
    discard_depth: u32,
}

/// A scanned numeric span, before the `N`-suffix rule picks the variant.
enum Num {
    Int(BigInt),
    Float(f64),
}

impl Num {
    fn as_f64(&self) -> f64 {
        match self {
            Num::Int(n) => n.to_f64().unwrap_or(f64::NAN),
            Num::Float(f) => *f,
        }
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '=' | '>'
                | '?' | '_'
        )
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == ','
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::new_with_name(input, "input.edn".to_string())
    }

    pub fn new_with_name(input: &'a str, name: String) -> Self {
        Self {
            source: Arc::new(NamedSource::new(name, input.to_string())),
            input,
            pos: 0,
            discard_depth: 0,
        }
    }

    /// Current byte offset into the input. After a successful `read_any`
    /// this sits exactly one past the last character of the form read.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    // === Dispatcher ===

    /// Reads the next form at the cursor.
    ///
    /// Returns `Ok(None)` when there is no value at this position: the input
    /// is exhausted, the cursor sits on a closing delimiter (which is left
    /// unconsumed so the enclosing collection can detect its own
    /// terminator), or a comment was consumed.
    pub fn read_any(&mut self) -> Result<Option<Value>, EdnError> {
        loop {
            let Some(c) = self.peek() else {
                return Ok(None);
            };
            return match c {
                ';' => {
                    self.skip_comment();
                    Ok(None)
                }
                '#' => self.read_hash(),
                '}' | ']' | ')' => Ok(None),
                '{' => {
                    let open = self.pos;
                    self.bump();
                    self.read_map(open).map(|m| Some(Value::Map(m)))
                }
                '[' => {
                    let open = self.pos;
                    self.bump();
                    self.read_seq(open, ']').map(|v| Some(Value::Vector(v)))
                }
                '(' => {
                    let open = self.pos;
                    self.bump();
                    self.read_seq(open, ')').map(|v| Some(Value::List(v)))
                }
                '"' => self.read_string().map(|s| Some(Value::String(s))),
                '\\' => self.read_character().map(Some),
                // Builtins cannot begin with `:`, so this is always a symbol.
                ':' => Ok(Some(self.read_symbol_or_builtin())),
                c if is_blank(c) => {
                    self.bump();
                    continue;
                }
                '-' | '+' | '.' => self.read_symbol_or_number().map(Some),
                c if c.is_ascii_digit() => self.read_number_or_ratio().map(Some),
                '@' => self.err_malformed(self.pos, 1, "reserved `@` syntax"),
                _ => Ok(Some(self.read_symbol_or_builtin())),
            };
        }
    }

    // === Numbers ===

    /// Number ::= [sign] digits [`.` digits] [exponent] [`M` | `N`]
    ///
    /// The scan is local and trusting: it collects every character drawn
    /// from `{0-9 E e M . + -}` without re-checking placement, then lets the
    /// numeric parser decide. A trailing `N` makes the span an
    /// arbitrary-precision integer; anything else is read as a float. A
    /// trailing `M` (exact-decimal marker) is accepted lexically but folds
    /// into the float result — a deliberate, documented precision loss.
    fn scan_number(&mut self) -> Result<Num, EdnError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '0'..='9' | 'E' | 'e' | 'M' | '.' | '+' | '-') {
                self.bump();
            } else {
                break;
            }
        }
        let span = &self.input[start..self.pos];
        if self.peek() == Some('N') {
            self.bump();
            match span.parse::<BigInt>() {
                Ok(n) => Ok(Num::Int(n)),
                Err(_) => self.err_malformed(
                    start,
                    span.len().max(1),
                    "invalid arbitrary-precision integer",
                ),
            }
        } else {
            let digits = span.strip_suffix('M').unwrap_or(span);
            match digits.parse::<f64>() {
                Ok(f) => Ok(Num::Float(f)),
                Err(_) => self.err_malformed(start, span.len().max(1), "invalid numeric literal"),
            }
        }
    }

    /// NumberOrRatio ::= Number [`/` Number]
    ///
    /// Ratio literals are intentionally approximated: numerator and
    /// denominator divide as floats, with IEEE semantics for `x/0`.
    fn read_number_or_ratio(&mut self) -> Result<Value, EdnError> {
        let num = self.scan_number()?;
        if self.peek() == Some('/') {
            self.bump();
            let denom = self.scan_number()?;
            Ok(Value::Float(num.as_f64() / denom.as_f64()))
        } else {
            Ok(match num {
                Num::Int(n) => Value::Integer(n),
                Num::Float(f) => Value::Float(f),
            })
        }
    }

    /// A leading `-`, `+`, or `.` is a number only when a digit follows;
    /// otherwise the span is a symbol (`-foo`, a bare `+`, ...).
    fn read_symbol_or_number(&mut self) -> Result<Value, EdnError> {
        let mut chars = self.rest().chars();
        chars.next();
        if chars.next().is_some_and(|c| c.is_ascii_digit()) {
            self.read_number_or_ratio()
        } else {
            Ok(self.read_symbol_or_builtin())
        }
    }

    // === Strings & characters ===

    /// String ::= `"` chars `"`
    ///
    /// Decodes escapes as it scans, so every occurrence of every escape
    /// sequence is replaced. Unknown escapes are kept verbatim, backslash
    /// included, per the permissive posture.
    fn read_string(&mut self) -> Result<String, EdnError> {
        let open = self.pos;
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return self.err_unterminated_literal(open),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return self.err_unterminated_literal(open),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// Character ::= `\` (`newline` | `return` | `space` | `tab` | char)
    ///
    /// Named literals are matched by their full spelling against the text
    /// after the backslash; only when none matches does the single next
    /// character win.
    fn read_character(&mut self) -> Result<Value, EdnError> {
        const NAMED: [(&str, char); 4] = [
            ("newline", '\n'),
            ("return", '\r'),
            ("space", ' '),
            ("tab", '\t'),
        ];
        let open = self.pos;
        self.bump(); // backslash
        for (name, ch) in NAMED {
            if self.rest().starts_with(name) {
                self.pos += name.len();
                return Ok(Value::Character(ch));
            }
        }
        match self.bump() {
            Some(c) => Ok(Value::Character(c)),
            None => self.err_unterminated_literal(open),
        }
    }

    // === Symbols ===

    /// Scans a symbol span. The character at the cursor is consumed
    /// unconditionally (the dispatcher vetted it, and it may be the leading
    /// `:` of a keyword); the scan then runs while characters belong to the
    /// symbol-constituent set.
    fn read_symbol_text(&mut self) -> String {
        let start = self.pos;
        self.bump();
        while let Some(c) = self.peek() {
            if is_symbol_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        self.input[start..self.pos].to_string()
    }

    /// Maps the exact spans `true`, `false`, and `nil` to their builtin
    /// values; every other span is a symbol holding that exact text.
    fn read_symbol_or_builtin(&mut self) -> Value {
        let text = self.read_symbol_text();
        match text.as_str() {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            "nil" => Value::Nil,
            _ => Value::Symbol(text),
        }
    }

    // === Collections ===

    /// Vector and List share one loop, parameterized by the closing
    /// delimiter. `None` results from the dispatcher (comments, discards
    /// that ran off the end) are skipped without appending.
    fn read_seq(&mut self, open: usize, close: char) -> Result<Vec<Value>, EdnError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return self.err_unterminated_collection(open),
                Some(c) if c == close => {
                    self.bump();
                    return Ok(items);
                }
                Some(c) if matches!(c, '}' | ']' | ')') => {
                    // A foreign closer would make the dispatcher spin in
                    // place forever; fail instead.
                    return self.err_malformed(self.pos, 1, "mismatched closing delimiter");
                }
                Some(_) => {
                    if let Some(v) = self.read_any()? {
                        items.push(v);
                    }
                }
            }
        }
    }

    /// Map ::= `{` (key value)* `}`
    ///
    /// Alternates key and value scans, skipping no-value results on both
    /// sides. A key whose value never arrives before the `}` is an error.
    fn read_map(&mut self, open: usize) -> Result<Vec<(Value, Value)>, EdnError> {
        let mut entries = Vec::new();
        loop {
            let key_start;
            let key = loop {
                match self.peek() {
                    None => return self.err_unterminated_collection(open),
                    Some('}') => {
                        self.bump();
                        return Ok(entries);
                    }
                    Some(']') | Some(')') => {
                        return self.err_malformed(self.pos, 1, "mismatched closing delimiter");
                    }
                    // Skip blanks here rather than in the dispatcher, so
                    // `at` lands on the key's first character.
                    Some(c) if is_blank(c) => {
                        self.bump();
                    }
                    Some(_) => {
                        let at = self.pos;
                        if let Some(k) = self.read_any()? {
                            key_start = at;
                            break k;
                        }
                    }
                }
            };
            let value = loop {
                match self.peek() {
                    None => return self.err_unterminated_collection(open),
                    Some('}') => {
                        return self.err_odd_map_entries(key_start, self.pos - key_start);
                    }
                    Some(']') | Some(')') => {
                        return self.err_malformed(self.pos, 1, "mismatched closing delimiter");
                    }
                    Some(_) => {
                        if let Some(v) = self.read_any()? {
                            break v;
                        }
                    }
                }
            };
            value::map_insert(&mut entries, key, value);
        }
    }

    /// Set ::= `#{` value* `}`, duplicate-suppressing on insertion.
    fn read_set(&mut self, open: usize) -> Result<Vec<Value>, EdnError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return self.err_unterminated_collection(open),
                Some('}') => {
                    self.bump();
                    return Ok(items);
                }
                Some(']') | Some(')') => {
                    return self.err_malformed(self.pos, 1, "mismatched closing delimiter");
                }
                Some(_) => {
                    if let Some(v) = self.read_any()? {
                        value::set_insert(&mut items, v);
                    }
                }
            }
        }
    }

    // === Tagged literals ===

    /// Hash ::= `#_` form | `#{` set | `#` tag form
    ///
    /// `#_` parses and discards exactly one form, then yields whatever
    /// follows it in the stream. Tag resolution (`inst`) never runs on
    /// content inside a discarded form: the discard raises a depth counter
    /// that the tag handlers check before interpreting their payload.
    fn read_hash(&mut self) -> Result<Option<Value>, EdnError> {
        let open = self.pos;
        self.bump(); // '#'
        match self.peek() {
            None => self.err_unterminated_literal(open),
            Some('_') => {
                self.bump();
                self.discard_depth += 1;
                let discarded = self.read_any();
                self.discard_depth -= 1;
                discarded?;
                self.read_any()
            }
            Some('{') => {
                self.bump();
                self.read_set(open).map(|s| Some(Value::Set(s)))
            }
            Some(_) => {
                let tag = self.read_symbol_text();
                match tag.as_str() {
                    "inst" | "uuid" => self.read_tag_payload(&tag),
                    // Unknown tags are transparent: the tagged value is
                    // returned as-is and the tag identity is dropped.
                    _ => self.read_any(),
                }
            }
        }
    }

    /// `#inst` and `#uuid` each expect a quoted string; without one they
    /// degrade to transparent-tag behavior.
    fn read_tag_payload(&mut self, tag: &str) -> Result<Option<Value>, EdnError> {
        while self.peek().is_some_and(is_blank) {
            self.bump();
        }
        if self.peek() != Some('"') {
            return self.read_any();
        }
        let payload_start = self.pos;
        let text = self.read_string()?;
        if self.discard_depth > 0 || tag == "uuid" {
            // uuid keeps its raw string content; a discarded inst is never
            // interpreted.
            return Ok(Some(Value::String(text)));
        }
        match DateTime::parse_from_rfc3339(&text) {
            Ok(dt) => Ok(Some(Value::Instant(dt))),
            Err(_) => self.err_malformed(
                payload_start,
                self.pos - payload_start,
                "invalid #inst timestamp",
            ),
        }
    }

    // === Comments ===

    /// `;` to end of line. The newline itself is left for the whitespace
    /// skip; the comment yields no value.
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
    }

    // === Cursor helpers ===

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        c
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    // === Error constructors ===

    fn src(&self) -> NamedSource<String> {
        (*self.source).clone()
    }

    fn err_unterminated_literal<T>(&self, open: usize) -> Result<T, EdnError> {
        Err(ReaderError::UnterminatedLiteral {
            src: self.src(),
            span: (open, 1).into(),
        }
        .into())
    }

    fn err_unterminated_collection<T>(&self, open: usize) -> Result<T, EdnError> {
        Err(ReaderError::UnterminatedCollection {
            src: self.src(),
            span: (open, 1).into(),
        }
        .into())
    }

    fn err_odd_map_entries<T>(&self, at: usize, len: usize) -> Result<T, EdnError> {
        Err(ReaderError::OddMapEntries {
            src: self.src(),
            span: (at, len.max(1)).into(),
        }
        .into())
    }

    fn err_malformed<T>(&self, at: usize, len: usize, detail: &str) -> Result<T, EdnError> {
        Err(ReaderError::MalformedInput {
            src: self.src(),
            span: (at, len).into(),
            detail: detail.to_string(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReaderError;
    use num_bigint::BigInt;

    fn read_one(input: &str) -> Value {
        let mut reader = Reader::new(input);
        loop {
            let before = reader.offset();
            match reader.read_any() {
                Ok(Some(v)) => return v,
                Ok(None) => {
                    assert!(
                        !reader.at_end() && reader.offset() != before,
                        "no value in {input:?}"
                    );
                }
                Err(err) => panic!("failed to read {input:?}: {err:?}"),
            }
        }
    }

    fn read_err(input: &str) -> ReaderError {
        let mut reader = Reader::new(input);
        loop {
            let before = reader.offset();
            match reader.read_any() {
                Ok(Some(v)) => panic!("expected error for {input:?}, got {v:?}"),
                Ok(None) => {
                    assert!(
                        !reader.at_end() && reader.offset() != before,
                        "expected error for {input:?}, got no value"
                    );
                }
                Err(EdnError::Reader(e)) => return e,
            }
        }
    }

    fn sym(s: &str) -> Value {
        Value::Symbol(s.to_string())
    }

    #[test]
    fn test_integer_requires_n_suffix() {
        assert_eq!(read_one("42"), Value::Float(42.0));
        assert_eq!(read_one("42N"), Value::Integer(BigInt::from(42)));
        assert_eq!(
            read_one("123456789012345678901234567890N"),
            Value::Integer("123456789012345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn test_float_spellings() {
        assert_eq!(read_one("-7"), Value::Float(-7.0));
        assert_eq!(read_one("+3"), Value::Float(3.0));
        assert_eq!(read_one(".5"), Value::Float(0.5));
        assert_eq!(read_one("2.5e2"), Value::Float(250.0));
        // M folds into the float result.
        assert_eq!(read_one("3.14M"), Value::Float(3.14));
    }

    #[test]
    fn test_ratio_divides_as_float() {
        assert_eq!(read_one("1/4"), Value::Float(0.25));
        assert_eq!(read_one("-1/2"), Value::Float(-0.5));
    }

    #[test]
    fn test_cursor_lands_one_past_literal() {
        let mut reader = Reader::new("42 ");
        assert_eq!(reader.read_any().unwrap(), Some(Value::Float(42.0)));
        assert_eq!(reader.offset(), 2);

        let mut reader = Reader::new("42N]");
        assert_eq!(
            reader.read_any().unwrap(),
            Some(Value::Integer(BigInt::from(42)))
        );
        assert_eq!(reader.offset(), 3);
    }

    #[test]
    fn test_builtins() {
        assert_eq!(read_one("true"), Value::Boolean(true));
        assert_eq!(read_one("false"), Value::Boolean(false));
        assert_eq!(read_one("nil"), Value::Nil);
    }

    #[test]
    fn test_symbols_and_keywords_are_distinct() {
        assert_eq!(read_one("x"), sym("x"));
        assert_eq!(read_one(":x"), sym(":x"));
        assert_ne!(read_one("x"), read_one(":x"));
        assert_eq!(read_one("-foo"), sym("-foo"));
        assert_eq!(read_one("+"), sym("+"));
        assert_eq!(read_one("my.ns/fn?"), sym("my.ns/fn?"));
        // `:true` is keyword syntax, never the boolean builtin.
        assert_eq!(read_one(":true"), sym(":true"));
    }

    #[test]
    fn test_string_escapes_replaced_everywhere() {
        assert_eq!(
            read_one(r#""a\nb\nc""#),
            Value::String("a\nb\nc".to_string())
        );
        assert_eq!(
            read_one(r#""tab\there, quote \" and back\\slash""#),
            Value::String("tab\there, quote \" and back\\slash".to_string())
        );
        assert_eq!(read_one(r#""""#), Value::String(String::new()));
    }

    #[test]
    fn test_character_literals() {
        assert_eq!(read_one(r"\a"), Value::Character('a'));
        assert_eq!(read_one(r"\newline"), Value::Character('\n'));
        assert_eq!(read_one(r"\return"), Value::Character('\r'));
        assert_eq!(read_one(r"\space"), Value::Character(' '));
        assert_eq!(read_one(r"\tab"), Value::Character('\t'));
        // Full-spelling match only; `\n` alone is the letter n.
        assert_eq!(read_one(r"\n"), Value::Character('n'));
    }

    #[test]
    fn test_vector_and_list() {
        assert_eq!(
            read_one("[1 2 3]"),
            Value::Vector(vec![
                Value::Float(1.0),
                Value::Float(2.0),
                Value::Float(3.0)
            ])
        );
        assert_eq!(read_one("(a b)"), Value::List(vec![sym("a"), sym("b")]));
        assert_eq!(read_one("[]"), Value::Vector(vec![]));
        // Commas are whitespace.
        assert_eq!(
            read_one("[1, 2]"),
            Value::Vector(vec![Value::Float(1.0), Value::Float(2.0)])
        );
    }

    #[test]
    fn test_set_dedups_in_source_order() {
        assert_eq!(
            read_one("#{1 2 2 3}"),
            Value::Set(vec![
                Value::Float(1.0),
                Value::Float(2.0),
                Value::Float(3.0)
            ])
        );
    }

    #[test]
    fn test_map_last_write_wins() {
        assert_eq!(
            read_one("{:a 1 :a 2}"),
            Value::Map(vec![(sym(":a"), Value::Float(2.0))])
        );
        assert_eq!(
            read_one("{:a 1 :b 2 :a 3}"),
            Value::Map(vec![
                (sym(":a"), Value::Float(3.0)),
                (sym(":b"), Value::Float(2.0)),
            ])
        );
    }

    #[test]
    fn test_nested_collections() {
        assert_eq!(
            read_one("{:xs [1 {:y #{2}}]}"),
            Value::Map(vec![(
                sym(":xs"),
                Value::Vector(vec![
                    Value::Float(1.0),
                    Value::Map(vec![(sym(":y"), Value::Set(vec![Value::Float(2.0)]))]),
                ]),
            )])
        );
    }

    #[test]
    fn test_discard_removes_one_form() {
        assert_eq!(
            read_one("[1 #_2 3]"),
            Value::Vector(vec![Value::Float(1.0), Value::Float(3.0)])
        );
        assert_eq!(read_one("#_5 6"), Value::Float(6.0));
        assert_eq!(
            read_one("[1 #_[2 3] 4]"),
            Value::Vector(vec![Value::Float(1.0), Value::Float(4.0)])
        );
        assert_eq!(
            read_one("{:a #_:b 1}"),
            Value::Map(vec![(sym(":a"), Value::Float(1.0))])
        );
    }

    #[test]
    fn test_comment_skipped_inside_collection() {
        assert_eq!(
            read_one("[1 ; comment\n2]"),
            Value::Vector(vec![Value::Float(1.0), Value::Float(2.0)])
        );
        assert_eq!(
            read_one("{:a ; half\n1}"),
            Value::Map(vec![(sym(":a"), Value::Float(1.0))])
        );
        assert_eq!(read_one("; leading\n42"), Value::Float(42.0));
    }

    #[test]
    fn test_unknown_tag_is_transparent() {
        assert_eq!(read_one("#foo/bar 5"), read_one("5"));
        assert_eq!(read_one("#my/tag [1]"), Value::Vector(vec![Value::Float(1.0)]));
    }

    #[test]
    fn test_inst_resolves_to_instant() {
        let v = read_one(r#"#inst "1985-04-12T23:20:50.52Z""#);
        match v {
            Value::Instant(dt) => {
                let expected = DateTime::parse_from_rfc3339("1985-04-12T23:20:50.52Z").unwrap();
                assert_eq!(dt, expected);
                assert_eq!(dt.timestamp_millis(), 482196050520);
            }
            other => panic!("expected Instant, got {other:?}"),
        }
    }

    #[test]
    fn test_uuid_keeps_raw_string() {
        assert_eq!(
            read_one(r#"#uuid "f81d4fae-7dec-11d0-a765-00a0c91e6bf6""#),
            Value::String("f81d4fae-7dec-11d0-a765-00a0c91e6bf6".to_string())
        );
    }

    #[test]
    fn test_discarded_inst_is_never_interpreted() {
        // The payload is not a valid timestamp, but inside `#_` the tag
        // handler must not run.
        assert_eq!(read_one(r#"#_#inst "garbage" 1"#), Value::Float(1.0));
    }

    #[test]
    fn test_odd_map_entries_fails() {
        assert!(matches!(read_err("{:a}"), ReaderError::OddMapEntries { .. }));
        assert!(matches!(
            read_err("{:a 1 :b}"),
            ReaderError::OddMapEntries { .. }
        ));
    }

    #[test]
    fn test_odd_map_span_lands_on_trailing_key() {
        let err = read_err("{:a 1 :b}");
        assert!(matches!(err, ReaderError::OddMapEntries { .. }));
        assert_eq!(err.offset(), 6);

        // Wider blank runs must not shift the label off the key.
        let err = read_err("{:a 1   :b}");
        assert_eq!(err.offset(), 8);
    }

    #[test]
    fn test_empty_ratio_denominator_fails() {
        let err = read_err("1/N");
        assert!(matches!(err, ReaderError::MalformedInput { .. }));
        // The label still covers a character even though the scanned
        // span is empty.
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_unterminated_collection_fails() {
        assert!(matches!(
            read_err("[1 2"),
            ReaderError::UnterminatedCollection { .. }
        ));
        assert!(matches!(
            read_err("{:a 1"),
            ReaderError::UnterminatedCollection { .. }
        ));
        assert!(matches!(
            read_err("#{1"),
            ReaderError::UnterminatedCollection { .. }
        ));
        assert!(matches!(
            read_err("(1 [2)"),
            ReaderError::MalformedInput { .. } | ReaderError::UnterminatedCollection { .. }
        ));
    }

    #[test]
    fn test_unterminated_literal_fails() {
        assert!(matches!(
            read_err("\"abc"),
            ReaderError::UnterminatedLiteral { .. }
        ));
        assert!(matches!(
            read_err("\"abc\\"),
            ReaderError::UnterminatedLiteral { .. }
        ));
        assert!(matches!(
            read_err("#"),
            ReaderError::UnterminatedLiteral { .. }
        ));
        assert!(matches!(
            read_err("[\\"),
            ReaderError::UnterminatedLiteral { .. }
        ));
    }

    #[test]
    fn test_reserved_at_fails() {
        assert!(matches!(
            read_err("@deref"),
            ReaderError::MalformedInput { .. }
        ));
    }

    #[test]
    fn test_bad_inst_payload_fails() {
        assert!(matches!(
            read_err(r#"#inst "not-a-date""#),
            ReaderError::MalformedInput { .. }
        ));
    }

    #[test]
    fn test_closing_delimiter_left_for_caller() {
        let mut reader = Reader::new("]");
        assert_eq!(reader.read_any().unwrap(), None);
        assert_eq!(reader.offset(), 0);
    }
}
