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
#![allow(unused)]

//! ULP based float comparison and quadratic root solving

use crate::{sq, sqrt_safe};

/// number of representable doubles between two values we still consider to be equal.
/// The named precisions correspond (roughly) to the number of significant decimal digits
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Precision {
    P5,
    P7,
    P9,
    P13,
}

impl Precision {
    #[inline] pub fn max_ulps (&self)->i64 {
        match self {
            Precision::P5 => 1i64 << 40,
            Precision::P7 => 1i64 << 34,
            Precision::P9 => 1i64 << 27,
            Precision::P13 => 16348,
        }
    }

    /// absolute threshold below which values are compared against zero
    #[inline] pub fn zero_threshold (&self)->f64 {
        match self {
            Precision::P5 => 1.0e-5,
            Precision::P7 => 1.0e-7,
            Precision::P9 => 1.0e-9,
            Precision::P13 => 1.0e-13,
        }
    }
}

pub const DEFAULT_PRECISION: Precision = Precision::P13;

/// lexicographically ordered integer representation of a double
#[inline] fn ordered_bits (a: f64)->i64 {
    let i = a.to_bits() as i64;
    if i < 0 { i64::MIN.wrapping_sub(i) } else { i }
}

/// compare two doubles based on the number of representable values in between.
/// NaNs and infinities are never almost equal to anything (including themselves)
pub fn almost_equals_prec (a: f64, b: f64, prec: Precision)->bool {
    if a == b { return true }

    if a == 0.0 || b == 0.0 {
        let comp = prec.zero_threshold();
        if a.abs() < comp && b.abs() < comp { return true }
    }

    if !(a < b || b < a) { return false } // NaN
    if a.is_infinite() || b.is_infinite() { return false }

    let d = ordered_bits(a).wrapping_sub( ordered_bits(b)).wrapping_abs();
    d <= prec.max_ulps()
}

#[inline] pub fn almost_equals (a: f64, b: f64)->bool { almost_equals_prec(a, b, DEFAULT_PRECISION) }

#[inline] pub fn almost_less (a: f64, b: f64)->bool { !almost_equals(a,b) && a < b }
#[inline] pub fn almost_less_prec (a: f64, b: f64, prec: Precision)->bool { !almost_equals_prec(a,b,prec) && a < b }
#[inline] pub fn almost_greater (a: f64, b: f64)->bool { !almost_equals(a,b) && a > b }
#[inline] pub fn almost_greater_prec (a: f64, b: f64, prec: Precision)->bool { !almost_equals_prec(a,b,prec) && a > b }
#[inline] pub fn almost_leq (a: f64, b: f64)->bool { a <= b || almost_equals(a,b) }
#[inline] pub fn almost_geq (a: f64, b: f64)->bool { a >= b || almost_equals(a,b) }
#[inline] pub fn almost_geq_prec (a: f64, b: f64, prec: Precision)->bool { a >= b || almost_equals_prec(a,b,prec) }

/// root of a·x² + b·x + c selected by `eps` (+1 or -1).
/// Returns None if there is no real root. Degenerates into the linear solution if a == 0
pub fn root (a: f64, b: f64, c: f64, eps: i32)->Option<f64> {
    if a == 0.0 && b == 0.0 {
        None
    } else if a == 0.0 {
        Some(-c / b)
    } else {
        let sqb = sq(b);
        let ac = 4.0*a*c;
        if almost_equals(sqb,ac) || sqb > ac {
            Some( (-b + eps as f64 * sqrt_safe(sqb - ac)) / (2.0*a))
        } else {
            None
        }
    }
}

/// root of a·x² + 2b·x + c
pub fn root2b (a: f64, b: f64, c: f64, eps: i32)->Option<f64> {
    if a == 0.0 && b == 0.0 {
        None
    } else if a == 0.0 {
        Some(-c / (2.0*b))
    } else {
        let sqb = sq(b);
        let ac = a*c;
        if almost_equals(sqb,ac) || sqb > ac {
            Some( (-b + eps as f64 * sqrt_safe(sqb - ac)) / a)
        } else {
            None
        }
    }
}

/// positive root for the case of a negative constant term, i.e. a single positive solution
pub fn root_neg_c (a: f64, b: f64, c: f64)->Option<f64> {
    if a == 0.0 { return Some(-c / b) }
    let sqb = sq(b);
    let ac = 4.0*a*c;
    if almost_equals(sqb,ac) || sqb > ac {
        Some( (-b + sqrt_safe(sqb - ac)) / (2.0*a))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulps() {
        assert!( almost_equals( 1.0, 1.0 + 1e-15));
        assert!( !almost_equals( 1.0, 1.0 + 1e-10));
        assert!( almost_equals_prec( 1.0, 1.0 + 1e-10, Precision::P9));
        assert!( almost_equals( 0.0, 1e-14));
        assert!( !almost_equals( f64::NAN, f64::NAN));
        assert!( almost_equals( -1.0, -1.0 - 1e-15));
        assert!( !almost_equals( -1e-3, 1e-3));
    }

    #[test]
    fn test_roots() {
        // x² - 3x + 2 = (x-1)(x-2)
        assert_eq!( root(1.0, -3.0, 2.0, 1), Some(2.0));
        assert_eq!( root(1.0, -3.0, 2.0, -1), Some(1.0));
        assert_eq!( root(0.0, 2.0, -4.0, 1), Some(2.0));
        assert_eq!( root(0.0, 0.0, 1.0, 1), None);
        assert_eq!( root(1.0, 0.0, 1.0, 1), None);
        assert_eq!( root2b(1.0, -1.5, 2.0, 1), Some(2.0));
    }
}
