/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinKinematicsError>;

/// the reasons why a maneuver solver could not produce a result. These are normal outcomes when probing
/// feasibility, hence the error is `Copy` and carries no heap data
#[derive(Error,Debug,Clone,Copy,PartialEq)]
pub enum OdinKinematicsError {
    #[error("maneuver infeasible: {0}")]
    Infeasible(&'static str),

    #[error("no convergence after {0} iterations")]
    NoConvergence(usize),

    #[error("degenerate geometry: {0}")]
    Degenerate(&'static str),

    #[error("mixed geodesic and flat positions")]
    InconsistentFrames,
}

pub fn infeasible (reason: &'static str)->OdinKinematicsError {
    OdinKinematicsError::Infeasible(reason)
}

pub fn degenerate (reason: &'static str)->OdinKinematicsError {
    OdinKinematicsError::Degenerate(reason)
}
