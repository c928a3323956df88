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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::schema::Column;
use crate::Result;

/// Well-known keys in a table descriptor's parameter bag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableParameter {
    /// The raw partition template, e.g. `year=${year}/birth_month${month}/`.
    PartitionPattern,
    /// File format classification of the table data, e.g. `parquet`.
    Classification,
}

impl AsRef<str> for TableParameter {
    fn as_ref(&self) -> &str {
        match self {
            Self::PartitionPattern => "partition.pattern",
            Self::Classification => "classification",
        }
    }
}

/// Read-only view of a catalog table, as handed over by the metadata
/// collaborator. The descriptor is never mutated by this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Base path prefix of the table data. Never matched against a
    /// candidate folder, only stripped from absolute listing entries.
    location: String,
    /// Declared partition keys. Declaration order is the canonical
    /// left-to-right ordering of extracted values.
    partition_columns: Vec<Column>,
    #[serde(default)]
    parameters: HashMap<String, String>,
}

impl TableDescriptor {
    pub fn new(
        location: impl Into<String>,
        partition_columns: Vec<Column>,
        parameters: HashMap<String, String>,
    ) -> Self {
        Self {
            location: location.into(),
            partition_columns,
            parameters,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn partition_columns(&self) -> &[Column] {
        &self.partition_columns
    }

    pub fn parameter(&self, key: TableParameter) -> Option<&str> {
        self.parameters.get(key.as_ref()).map(String::as_str)
    }

    /// The raw partition template declared on the table.
    ///
    /// Fails with [`CoreError::MissingTemplate`] when the parameter is
    /// absent or blank; a table without a template has no usable partition
    /// scheme.
    pub fn partition_pattern(&self) -> Result<&str> {
        match self.parameter(TableParameter::PartitionPattern) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(CoreError::MissingTemplate(format!(
                "table at '{}' has no '{}' parameter",
                self.location,
                TableParameter::PartitionPattern.as_ref()
            ))),
        }
    }

    /// Strips the table's base location (and one leading separator) from an
    /// object path, yielding the folder path a template matches against.
    /// Paths outside the table location are returned unchanged.
    pub fn relative_path<'a>(&self, object_path: &'a str) -> &'a str {
        let relative = object_path
            .strip_prefix(self.location.trim_end_matches('/'))
            .unwrap_or(object_path);
        relative.strip_prefix('/').unwrap_or(relative)
    }
}
