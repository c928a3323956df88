/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

//! Compiles a partition template into a folder-matching pattern.
//!
//! Compilation is a two-pass process: the template is first tokenized into
//! literal and placeholder segments, then each segment is emitted into an
//! anchored regular expression. Literals are escaped so path-structural
//! characters match verbatim; each placeholder becomes a capture group
//! shaped by its column's declared type.

use regex::Regex;

use crate::error::CoreError;
use crate::schema::{Column, ColumnType};
use crate::table::TableDescriptor;
use crate::Result;

pub(crate) const SEPARATOR: char = '/';

/// One token of a partition template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Literal path text, matched verbatim.
    Literal(String),
    /// A `${name}` placeholder referencing a declared partition column.
    Placeholder(String),
}

/// Splits a template into alternating literal and placeholder segments.
///
/// Fails with [`CoreError::MalformedPlaceholder`] on an unclosed `${`, a
/// `}` without a matching opener, or a placeholder name that is empty or
/// not an identifier.
pub fn tokenize(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while !rest.is_empty() {
        if let Some(after_open) = rest.strip_prefix("${") {
            let end = after_open.find('}').ok_or_else(|| {
                CoreError::MalformedPlaceholder(format!(
                    "unclosed '${{' in template '{template}'"
                ))
            })?;
            let name = after_open[..end].trim();
            if name.is_empty() {
                return Err(CoreError::MalformedPlaceholder(format!(
                    "empty placeholder in template '{template}'"
                )));
            }
            // A nested '${' or path text inside the braces means an earlier
            // opener was never closed.
            if !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(CoreError::MalformedPlaceholder(format!(
                    "invalid placeholder name '{name}' in template '{template}'"
                )));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            rest = &after_open[end + 1..];
        } else {
            // Literal run up to the next placeholder opener.
            let next_open = rest.find("${").unwrap_or(rest.len());
            let chunk = &rest[..next_open];
            if chunk.contains('}') {
                return Err(CoreError::MalformedPlaceholder(format!(
                    "'}}' without matching '${{' in template '{template}'"
                )));
            }
            literal.push_str(chunk);
            rest = &rest[next_open..];
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Binding of one placeholder to its capture group, in the order the
/// placeholders appear left to right in the template.
#[derive(Clone, Debug)]
pub struct Binding {
    /// The declared column name in its canonical casing.
    pub column: String,
    pub column_type: ColumnType,
    /// 1-based capture group in the compiled pattern.
    pub group: usize,
    /// Position of the column in the declaration order.
    pub(crate) column_index: usize,
}

/// A partition template compiled against a table's declared columns.
///
/// Ephemeral by design: it has no identity beyond the template and column
/// list that produced it, is never persisted, and is recomputed whenever
/// either input changes. Immutable once built and safe to share across
/// threads.
#[derive(Clone, Debug)]
pub struct CompiledTemplate {
    template: String,
    pattern: Regex,
    bindings: Vec<Binding>,
}

impl CompiledTemplate {
    /// Compiles the table's declared partition template.
    pub fn compile(table: &TableDescriptor) -> Result<Self> {
        Self::from_parts(table.partition_pattern()?, table.partition_columns())
    }

    /// Compiles a raw template string against a column list.
    pub fn from_parts(raw_template: &str, columns: &[Column]) -> Result<Self> {
        let template = directory_template(raw_template)?;
        let segments = tokenize(&template)?;

        let placeholder_count = segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder(_)))
            .count();
        if placeholder_count != columns.len() {
            return Err(CoreError::ColumnCountMismatch(format!(
                "template '{}' has {} placeholder(s) for {} declared partition column(s)",
                template,
                placeholder_count,
                columns.len()
            )));
        }

        let mut pattern = String::from("^");
        let mut bindings: Vec<Binding> = Vec::with_capacity(columns.len());
        let mut bound = vec![false; columns.len()];

        for segment in &segments {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Placeholder(name) => {
                    let column_index = columns
                        .iter()
                        .position(|c| c.name.eq_ignore_ascii_case(name))
                        .ok_or_else(|| {
                            CoreError::UnknownPlaceholderColumn(format!(
                                "'{name}' in template '{template}' is not a declared partition column"
                            ))
                        })?;
                    if bound[column_index] {
                        return Err(CoreError::ColumnCountMismatch(format!(
                            "column '{}' is referenced more than once in template '{}'",
                            columns[column_index].name, template
                        )));
                    }
                    bound[column_index] = true;

                    let column = &columns[column_index];
                    pattern.push_str(column.column_type.capture_pattern());
                    bindings.push(Binding {
                        column: column.name.clone(),
                        column_type: column.column_type,
                        group: bindings.len() + 1,
                        column_index,
                    });
                }
            }
        }

        // The assembled pattern must end at a folder boundary, otherwise a
        // value such as year=20 could match inside year=2000.
        if !pattern.ends_with(SEPARATOR) {
            return Err(CoreError::MissingTrailingSeparator(format!(
                "pattern '{pattern}' compiled from template '{template}' does not end at a folder boundary"
            )));
        }
        pattern.push('$');

        Ok(Self {
            template,
            pattern: Regex::new(&pattern)?,
            bindings,
        })
    }

    /// The validated template, directory-terminated.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The anchored pattern string, ready for literal recompilation.
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Placeholder bindings in template order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether the candidate folder path is a partition folder of this
    /// template. One leading separator is tolerated, since listing sources
    /// differ on whether they emit it.
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(normalize(path))
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.pattern
    }
}

/// Validates that the template describes a directory path, appending the
/// trailing separator when the final segment does not already end in one.
fn directory_template(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::MissingTemplate(
            "partition template is blank".to_string(),
        ));
    }
    if trimmed.ends_with(SEPARATOR) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{SEPARATOR}"))
    }
}

/// Strips one leading separator; listing sources differ on emitting it.
pub(crate) fn normalize(path: &str) -> &str {
    path.strip_prefix(SEPARATOR).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    fn columns(specs: &[(&str, ColumnType)]) -> Vec<Column> {
        specs
            .iter()
            .map(|(name, column_type)| Column::new(*name, *column_type))
            .collect()
    }

    fn birthday_columns() -> Vec<Column> {
        columns(&[("year", ColumnType::Bigint), ("month", ColumnType::Int)])
    }

    #[test]
    fn tokenize_hive_and_non_hive_segments() {
        let segments = tokenize("year=${year}/birth_month${month}/").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("year=".to_string()),
                Segment::Placeholder("year".to_string()),
                Segment::Literal("/birth_month".to_string()),
                Segment::Placeholder("month".to_string()),
                Segment::Literal("/".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_unclosed_placeholder() {
        let err = tokenize("year=${year/birth_month${month}/").unwrap_err();
        assert!(matches!(err, CoreError::MalformedPlaceholder(_)));
    }

    #[test]
    fn tokenize_stray_closing_brace() {
        let err = tokenize("year=year}/").unwrap_err();
        assert!(matches!(err, CoreError::MalformedPlaceholder(_)));
    }

    #[test]
    fn tokenize_empty_placeholder() {
        let err = tokenize("year=${}/").unwrap_err();
        assert!(matches!(err, CoreError::MalformedPlaceholder(_)));
    }

    #[test]
    fn compiled_pattern_has_no_braces() {
        let compiled =
            CompiledTemplate::from_parts("year=${year}/birth_month${month}/", &birthday_columns())
                .unwrap();
        assert!(!compiled.pattern_str().contains('{'));
        assert!(!compiled.pattern_str().contains('}'));
        assert!(compiled.pattern_str().starts_with('^'));
        assert!(compiled.pattern_str().ends_with('$'));
    }

    #[test]
    fn trailing_separator_is_appended() {
        let compiled =
            CompiledTemplate::from_parts("year=${year}/birth_month${month}", &birthday_columns())
                .unwrap();
        assert_eq!(compiled.template(), "year=${year}/birth_month${month}/");
        assert!(compiled.matches("year=2000/birth_month10/"));
        assert!(!compiled.matches("year=2000/birth_month10"));
    }

    #[test]
    fn placeholder_count_mismatch() {
        // Three placeholders over two declared columns.
        let err = CompiledTemplate::from_parts(
            "year=${year}/birth_month${month}/${day}",
            &birthday_columns(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ColumnCountMismatch(_)));
    }

    #[test]
    fn unknown_placeholder_column() {
        // Counts agree but 'day' is not declared.
        let err = CompiledTemplate::from_parts("${year}/${day}/", &birthday_columns()).unwrap_err();
        assert!(matches!(err, CoreError::UnknownPlaceholderColumn(_)));
    }

    #[test]
    fn duplicate_placeholder() {
        let err =
            CompiledTemplate::from_parts("${year}/${year}/", &birthday_columns()).unwrap_err();
        assert!(matches!(err, CoreError::ColumnCountMismatch(_)));
    }

    #[test]
    fn blank_template() {
        let err = CompiledTemplate::from_parts("   ", &birthday_columns()).unwrap_err();
        assert!(matches!(err, CoreError::MissingTemplate(_)));
    }

    #[test]
    fn placeholder_name_resolution_is_case_insensitive() {
        let state = columns(&[("stateName", ColumnType::String)]);
        let compiled = CompiledTemplate::from_parts("state=${statename}/", &state).unwrap();
        assert_eq!(compiled.bindings()[0].column, "stateName");
        assert!(compiled.matches("state=Tamilnadu/"));
    }

    #[test]
    fn literal_matching_is_case_sensitive() {
        let state = columns(&[("statename", ColumnType::String)]);
        let compiled = CompiledTemplate::from_parts("StateName=${statename}/", &state).unwrap();
        assert!(compiled.matches("StateName=WB/"));
        assert!(!compiled.matches("statename=WB/"));
    }

    #[test]
    fn literal_dots_are_not_wildcards() {
        let version = columns(&[("v", ColumnType::Int)]);
        let compiled = CompiledTemplate::from_parts("v1.0_${v}/", &version).unwrap();
        assert!(compiled.matches("v1.0_7/"));
        assert!(!compiled.matches("v1x0_7/"));
    }

    #[test]
    fn integer_capture_matches_whole_segment_only() {
        let year = columns(&[("year", ColumnType::Bigint)]);
        let compiled = CompiledTemplate::from_parts("year=${year}/", &year).unwrap();
        assert!(compiled.matches("year=2000/"));
        assert!(compiled.matches("year=20000/"));
        assert!(compiled.matches("year=-50/"));
        assert!(!compiled.matches("year=2000"));
        assert!(!compiled.matches("year=2000/extra/"));
        assert!(!compiled.matches("year=20x0/"));
    }

    #[test]
    fn date_capture_requires_fixed_shape() {
        let creation = columns(&[("creation_dt", ColumnType::Date)]);
        let compiled = CompiledTemplate::from_parts("creation_dt=${creation_dt}/", &creation)
            .unwrap();
        assert!(compiled.matches("creation_dt=2022-12-20/"));
        // Wrong digit count never matches; calendar validity is checked at
        // extraction time.
        assert!(!compiled.matches("creation_dt=2022-12-2/"));
        assert!(compiled.matches("creation_dt=2022-13-20/"));
    }

    #[test]
    fn digit_folders_match_odd_entries_only() {
        let compiled =
            CompiledTemplate::from_parts("year=${year}/birth_month${month}/", &birthday_columns())
                .unwrap();
        let folders = [
            ("state='Tamilnadu'/", false),
            ("year=2000/birth_month10/", true),
            ("zone=EST/", false),
            ("year=2001/birth_month01/", true),
            ("month01/", false),
        ];
        for (folder, expected) in folders {
            assert_eq!(compiled.matches(folder), expected, "folder {folder}");
        }
    }

    #[test]
    fn quoted_values_do_not_match_unquoted_template() {
        // Quote characters are outside the varchar alphabet; quoted folder
        // values are a known limitation, not silently unquoted.
        let state = columns(&[("stateName", ColumnType::String)]);
        let compiled = CompiledTemplate::from_parts("state=${stateName}/", &state).unwrap();
        assert!(compiled.matches("state=Tamilnadu/"));
        assert!(compiled.matches("state=UP/"));
        assert!(!compiled.matches("state='Tamilnadu'/"));
        assert!(!compiled.matches("state=\"Tamilnadu\"/"));
    }

    #[test]
    fn leading_separator_is_normalized() {
        let state = columns(&[
            ("statename", ColumnType::String),
            ("zipcode", ColumnType::Varchar),
        ]);
        let compiled =
            CompiledTemplate::from_parts("StateName=${statename}/ZipCode=${zipcode}/", &state)
                .unwrap();
        assert!(compiled.matches("StateName=UP/ZipCode=226001/"));
        assert!(compiled.matches("/StateName=UP/ZipCode=226001/"));
    }
}
