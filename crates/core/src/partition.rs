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

//! Extracts typed partition values from folder paths matched by a
//! [`CompiledTemplate`].

use std::fmt;

use chrono::NaiveDate;
use log::warn;

use crate::error::CoreError;
use crate::schema::ColumnType;
use crate::table::TableDescriptor;
use crate::template::{normalize, CompiledTemplate};
use crate::Result;

/// A partition value decoded into its column's declared type.
///
/// Quoted string values are kept verbatim; no quote characters are
/// stripped. In practice quotes never reach this point since the varchar
/// capture alphabet excludes them.
#[derive(Clone, Debug, PartialEq)]
pub enum PartitionValue {
    Int(i32),
    Bigint(i64),
    Date(NaiveDate),
    String(String),
}

impl PartitionValue {
    pub(crate) fn parse(raw: &str, column_type: ColumnType) -> Result<Self> {
        match column_type {
            ColumnType::Int => raw.parse::<i32>().map(Self::Int).map_err(|e| {
                CoreError::ValueConversion(format!("'{raw}' is not a valid int: {e}"))
            }),
            ColumnType::Bigint => raw.parse::<i64>().map(Self::Bigint).map_err(|e| {
                CoreError::ValueConversion(format!("'{raw}' is not a valid bigint: {e}"))
            }),
            ColumnType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|e| {
                    CoreError::ValueConversion(format!("'{raw}' is not a valid date: {e}"))
                }),
            ColumnType::Varchar | ColumnType::String => Ok(Self::String(raw.to_string())),
        }
    }
}

impl fmt::Display for PartitionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Bigint(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// Typed partition values for one folder, keyed by the declared column
/// name in its canonical casing. Iteration order mirrors the column
/// declaration order. Lives only for the duration of one extraction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartitionValues {
    entries: Vec<(String, PartitionValue)>,
}

impl PartitionValues {
    fn new(entries: Vec<(String, PartitionValue)>) -> Self {
        Self { entries }
    }

    /// Looks up a value by column name, case-insensitively.
    pub fn get(&self, column: &str) -> Option<&PartitionValue> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PartitionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl IntoIterator for PartitionValues {
    type Item = (String, PartitionValue);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Decodes the partition values encoded in a folder path.
///
/// The caller is expected to have filtered the listing with
/// [`CompiledTemplate::matches`]; calling this on a non-matching path is a
/// contract violation and fails with [`CoreError::PathNotMatched`]. A
/// captured substring that cannot be parsed into its column's declared
/// type fails with [`CoreError::ValueConversion`].
pub fn extract_partition_values(
    compiled: &CompiledTemplate,
    path: &str,
) -> Result<PartitionValues> {
    let captures = compiled.regex().captures(normalize(path)).ok_or_else(|| {
        CoreError::PathNotMatched(format!(
            "folder '{}' does not match partition template '{}'",
            path,
            compiled.template()
        ))
    })?;

    // Bindings are in template order; the output mirrors declaration order.
    let mut ordered: Vec<_> = compiled.bindings().iter().collect();
    ordered.sort_by_key(|binding| binding.column_index);

    let mut entries = Vec::with_capacity(ordered.len());
    for binding in ordered {
        let raw = captures.get(binding.group).map(|m| m.as_str()).ok_or_else(|| {
            CoreError::PathNotMatched(format!(
                "no capture for column '{}' in folder '{}'",
                binding.column, path
            ))
        })?;
        let value = PartitionValue::parse(raw, binding.column_type)?;
        entries.push((binding.column.clone(), value));
    }
    Ok(PartitionValues::new(entries))
}

/// A matched partition folder and its decoded values.
#[derive(Clone, Debug, PartialEq)]
pub struct PartitionFolder {
    /// Folder path relative to the table location, directory-terminated.
    pub path: String,
    pub values: PartitionValues,
}

/// Resolves a bucket listing against the table's partition template.
///
/// Compiles the template once, skips folders the pattern does not match,
/// and decodes the rest. A folder whose captured values fail conversion is
/// logged and skipped without aborting the remaining folders.
pub fn resolve_partitions<I, S>(table: &TableDescriptor, folders: I) -> Result<Vec<PartitionFolder>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let compiled = CompiledTemplate::compile(table)?;
    let mut resolved = Vec::new();
    for folder in folders {
        let folder = folder.as_ref();
        if !compiled.matches(folder) {
            continue;
        }
        match extract_partition_values(&compiled, folder) {
            Ok(values) => resolved.push(PartitionFolder {
                path: folder.to_string(),
                values,
            }),
            Err(e) => warn!("Skipping partition folder '{folder}': {e}"),
        }
    }
    Ok(resolved)
}
