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

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::error::CoreError;
use crate::Result;

/// Semantic type of a partition column, as declared in the table metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "bigint")]
    Bigint,
    #[strum(serialize = "date")]
    Date,
    #[strum(serialize = "varchar")]
    Varchar,
    #[strum(serialize = "string")]
    String,
}

impl ColumnType {
    /// Sub-pattern capturing one value of this type within a single path
    /// segment. The varchar alphabet deliberately excludes `/` so a value
    /// can never span a folder boundary, and excludes quote characters
    /// (quoted values are not unquoted, see [`crate::partition`]).
    pub(crate) fn capture_pattern(&self) -> &'static str {
        match self {
            Self::Int | Self::Bigint => "(-?[0-9]+)",
            Self::Date => "([0-9]{4}-[0-9]{2}-[0-9]{2})",
            Self::Varchar | Self::String => "([A-Za-z0-9_.-]+)",
        }
    }
}

impl FromStr for ColumnType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        // Catalog types may carry a length, e.g. varchar(20)
        let base = s.split('(').next().unwrap_or(s).trim();
        match base.to_ascii_lowercase().as_str() {
            "int" | "integer" | "smallint" | "tinyint" => Ok(Self::Int),
            "bigint" | "long" => Ok(Self::Bigint),
            "date" => Ok(Self::Date),
            "varchar" | "char" => Ok(Self::Varchar),
            "string" => Ok(Self::String),
            v => Err(CoreError::UnsupportedColumnType(v.to_string())),
        }
    }
}

/// A declared partition column. Column names are case-insensitive
/// identifiers; the declared casing is the canonical one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Builds a column from the metastore's string spelling of its type.
    pub fn try_new(name: impl Into<String>, column_type: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            column_type: ColumnType::from_str(column_type)?,
        })
    }
}
