/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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
#![allow(unused,uncommon_codepoints)]

use std::f64::consts::{PI as STD_PI};

pub mod macros;
pub mod errors;
pub mod numeric;
pub mod angle;
pub mod vect;
pub mod geo_constants;
pub mod tolerance;
pub mod config;

pub use errors::{OdinCommonError, Result};

// syntactic sugar - this is just more readable in many cases
#[inline(always)] pub fn sin(x:f64) -> f64 { x.sin() }
#[inline(always)] pub fn sin2(x:f64) -> f64 { let sin_x = x.sin(); sin_x*sin_x }
#[inline(always)] pub fn cos(x:f64) -> f64 { x.cos() }
#[inline(always)] pub fn cos2(x:f64) -> f64 { let cos_x = x.cos(); cos_x*cos_x }
#[inline(always)] pub fn tan(x:f64) -> f64 { x.tan() }
#[inline(always)] pub fn atan(x:f64) -> f64 { x.atan() }
#[inline(always)] pub fn sqrt(x:f64) -> f64 { x.sqrt() }
#[inline(always)] pub fn pow2(x:f64) -> f64 { x*x }
#[inline(always)] pub fn abs(x:f64) -> f64 { x.abs() }
#[inline(always)] pub fn deg(x:f64)->f64 { x.to_degrees() }
#[inline(always)] pub fn rad(x:f64)->f64 { x.to_radians() }

/* #region safe numerics *****************************************************************************************/

// the inverse trig functions are clamped so that round-off errors just outside [-1,1] do not turn into NaNs

#[inline(always)] pub fn sq(x:f64) -> f64 { x*x }

/// square root that treats negative (round-off) arguments as 0
#[inline] pub fn sqrt_safe(x:f64) -> f64 { x.max(0.0).sqrt() }

/// atan2 that returns 0 for the undefined (0,0) case
#[inline] pub fn atan2_safe(y:f64, x:f64) -> f64 {
    if y == 0.0 && x == 0.0 { 0.0 } else { y.atan2(x) }
}

#[inline] pub fn asin_safe(x:f64) -> f64 { x.min(1.0).max(-1.0).asin() }
#[inline] pub fn acos_safe(x:f64) -> f64 { x.min(1.0).max(-1.0).acos() }

/// discriminant of a·x² + b·x + c
#[inline] pub fn discr(a:f64, b:f64, c:f64) -> f64 { sq(b) - 4.0*a*c }

/// sign with the convention that 0 counts as positive
#[inline] pub fn sign(x:f64) -> i32 { if x >= 0.0 { 1 } else { -1 } }

#[inline] pub fn sign_of(b:bool) -> i32 { if b { 1 } else { -1 } }

/// three-valued sign (-1,0,1)
#[inline] pub fn sign_triple(x:f64) -> i32 {
    if x > 0.0 { 1 } else if x < 0.0 { -1 } else { 0 }
}

#[inline] pub fn within_epsilon(a:f64, b:f64, epsilon:f64) -> bool { (a-b).abs() < epsilon }

#[inline] pub fn within_epsilon0(a:f64, epsilon:f64) -> bool { a.abs() < epsilon }

/* #endregion safe numerics */

pub const PI: f64 = STD_PI;
pub const HALF_PI: f64 = PI / 2.0;
pub const TWO_PI: f64 = PI * 2.0;
