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

use thiserror::Error;

pub type Result<T, E = CoreError> = std::result::Result<T, E>;

/// Errors raised while compiling a partition template or extracting
/// partition values from a folder path.
///
/// These are configuration or data errors, not transient faults; none of
/// them is retried or recovered internally.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("No partition template declared: {0}")]
    MissingTemplate(String),

    #[error("Malformed placeholder: {0}")]
    MalformedPlaceholder(String),

    #[error("Placeholder refers to an undeclared partition column: {0}")]
    UnknownPlaceholderColumn(String),

    #[error("Placeholders do not line up with declared partition columns: {0}")]
    ColumnCountMismatch(String),

    #[error("Template does not terminate a directory level: {0}")]
    MissingTrailingSeparator(String),

    #[error("Failed to convert partition value: {0}")]
    ValueConversion(String),

    #[error("Path does not match the partition template: {0}")]
    PathNotMatched(String),

    #[error("Unsupported partition column type: {0}")]
    UnsupportedColumnType(String),

    #[error(transparent)]
    InvalidPattern(#[from] regex::Error),
}
