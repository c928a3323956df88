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

//! Decodes partition information encoded in object-store folder paths when
//! the layout follows a per-table naming template such as
//! `year=${year}/birth_month${month}/` instead of a fixed convention.
//!
//! The template is declared in the table descriptor's parameter bag.
//! [`CompiledTemplate`] turns it into an anchored matching pattern once per
//! table; [`extract_partition_values`] decodes a matched folder path into
//! typed values, one per declared partition column.

pub mod error;
pub mod partition;
pub mod schema;
pub mod table;
pub mod template;

pub use error::{CoreError, Result};
pub use partition::{
    extract_partition_values, resolve_partitions, PartitionFolder, PartitionValue, PartitionValues,
};
pub use schema::{Column, ColumnType};
pub use table::{TableDescriptor, TableParameter};
pub use template::CompiledTemplate;
