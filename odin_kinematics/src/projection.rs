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

//! azimuthal equidistant projection of a spherical earth onto the tangent plane at a reference point.
//!
//! Distances and tracks from the reference point are preserved, everything else is distorted with increasing
//! distance. Projected coordinates are x east, y north and z the altitude above the reference altitude.

use std::fmt;
use odin_common::{PI, HALF_PI, acos_safe, atan2_safe, within_epsilon0};
use odin_common::angle::to_pi;
use odin_common::geo_constants::{SPHERICAL_EARTH_RADIUS, GPS_LIMIT_HORIZONTAL, NM};
use odin_common::vect::{Vect2, Vect3};
use crate::lat_lon_alt::LatLonAlt;
use crate::position::Position;
use crate::velocity::Velocity;
use crate::great_circle;

const R: f64 = SPHERICAL_EARTH_RADIUS;

/// time step used to project velocities through their end points
pub const TIME_STEP: f64 = 10.0;

// note the projection uses its own (mirrored) longitude orientation
fn spherical_to_xyz (lat: f64, lon: f64)->Vect3 {
    let theta = HALF_PI - lat;
    let phi = PI - lon;
    Vect3::new( R * theta.sin() * phi.cos(), R * theta.sin() * phi.sin(), R * theta.cos())
}

fn xyz_to_spherical (v: &Vect3, alt: f64)->LatLonAlt {
    let theta = acos_safe( v.z / R);
    let phi = atan2_safe( v.y, v.x);
    LatLonAlt::new( HALF_PI - theta, to_pi( PI - phi), alt)
}

/// a vector orthogonal to v in the xy plane, or the x axis if v is (almost) the z axis
fn orthogonal_to_y (v: &Vect3)->Vect3 {
    if !within_epsilon0( v.x, GPS_LIMIT_HORIZONTAL) || !within_epsilon0( v.y, GPS_LIMIT_HORIZONTAL) {
        Vect3::new( v.y, -v.x, 0.0)
    } else {
        Vect3::new( 1.0, 0.0, 0.0)
    }
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct AziEquiProjection {
    proj_alt: f64,
    ref_hat: Vect3,
    ref_ortho_hat: Vect3,
    ref_z_mult: Vect3,
    lla_ref: LatLonAlt,
}

impl AziEquiProjection {
    pub fn new (lla: LatLonAlt)->Self {
        let ref_xyz = spherical_to_xyz( lla.lat, lla.lon);
        let ref_hat = ref_xyz.hat();
        let ref_ortho_hat = orthogonal_to_y( &ref_xyz).hat();
        let ref_z_mult = ref_hat.cross( &ref_ortho_hat); // unit length since both are orthogonal unit vectors

        AziEquiProjection { proj_alt: lla.alt, ref_hat, ref_ortho_hat, ref_z_mult, lla_ref: lla }
    }

    #[inline] pub fn from_lat_lon_alt (lat: f64, lon: f64, alt: f64)->Self { AziEquiProjection::new( LatLonAlt::new( lat, lon, alt)) }

    /// range (m) within which the projection error stays below `accuracy` (m)
    pub fn conflict_range (&self, lat: f64, accuracy: f64)->f64 {
        (329.2 * (accuracy / NM).powf( 1.0/3.0)).floor() * NM
    }

    pub fn max_range (&self)->f64 { R * HALF_PI }

    #[inline] pub fn projection_point (&self)->LatLonAlt { self.lla_ref }

    pub fn project2 (&self, lla: &LatLonAlt)->Vect2 {
        let p2 = spherical_to_xyz( lla.lat, lla.lon);
        let p = Vect2::new( self.ref_ortho_hat.dot( &p2), -self.ref_z_mult.dot( &p2));
        let n = p.norm();

        if n <= 0.0 {
            Vect2::ZERO
        } else {
            p.scal( great_circle::distance( lla, &self.lla_ref) / n)
        }
    }

    pub fn project (&self, lla: &LatLonAlt)->Vect3 {
        Vect3::from_vect2( self.project2( lla), lla.alt - self.proj_alt)
    }

    /// project geodesic positions, flat positions are returned as is
    pub fn project_position (&self, p: &Position)->Vect3 {
        match p {
            Position::Geodesic(lla) => self.project( lla),
            Position::Flat(v) => *v,
        }
    }

    #[inline] pub fn inverse (&self, xyz: &Vect3)->LatLonAlt { self.inverse2( &xyz.vect2(), xyz.z) }

    pub fn inverse2 (&self, xy: &Vect2, alt: f64)->LatLonAlt {
        let d = great_circle::angle_from_distance( xy.norm(), 0.0).sin() * R;
        xyz_to_spherical( &self.equator_map_inv( &self.plane_to_sphere( &xy.hat().scal( d))), alt + self.proj_alt)
    }

    /// velocity at `lla` in the projected frame, computed from the projected end point after TIME_STEP
    pub fn project_velocity (&self, lla: &LatLonAlt, v: &Velocity)->Velocity {
        self.project_state( lla, v).1
    }

    pub fn project_velocity_at (&self, p: &Position, v: &Velocity)->Velocity {
        match p {
            Position::Geodesic(lla) => self.project_velocity( lla, v),
            Position::Flat(_) => *v,
        }
    }

    /// geodesic velocity at the inverse of the projected position `s`
    pub fn inverse_velocity (&self, s: &Vect3, v: &Velocity, to_lat_lon: bool)->Velocity {
        if to_lat_lon {
            let s2 = s.linear( &v.vect3(), TIME_STEP);
            great_circle::velocity_initial( &self.inverse( s), &self.inverse( &s2), TIME_STEP)
        } else {
            *v
        }
    }

    pub fn project_state (&self, lla: &LatLonAlt, v: &Velocity)->(Vect3,Velocity) {
        let s3 = self.project( lla);
        let ns3 = self.project( &great_circle::linear_initial( lla, v, TIME_STEP));
        (s3, Velocity::diff_scal( &ns3, &s3, 1.0 / TIME_STEP))
    }

    pub fn project_position_state (&self, p: &Position, v: &Velocity)->(Vect3,Velocity) {
        match p {
            Position::Geodesic(lla) => self.project_state( lla, v),
            Position::Flat(s) => (*s, *v),
        }
    }

    pub fn inverse_state (&self, p: &Vect3, v: &Velocity, to_lat_lon: bool)->(Position,Velocity) {
        if to_lat_lon {
            (Position::Geodesic( self.inverse( p)), self.inverse_velocity( p, v, true))
        } else {
            (Position::Flat( *p), *v)
        }
    }

    fn plane_to_sphere (&self, v: &Vect2)->Vect3 {
        let x = (R*R - v.x*v.x - v.y*v.y).sqrt();
        Vect3::new( x, v.x, -v.y)
    }

    // rotation back from the reference frame (transpose of the [ref_hat, ref_ortho_hat, ref_z_mult] rows)
    fn equator_map_inv (&self, p: &Vect3)->Vect3 {
        let (xm, ym, zm) = (&self.ref_hat, &self.ref_ortho_hat, &self.ref_z_mult);
        Vect3::new(
            Vect3::new( xm.x, ym.x, zm.x).dot( p),
            Vect3::new( xm.y, ym.y, zm.y).dot( p),
            Vect3::new( xm.z, ym.z, zm.z).dot( p)
        )
    }
}

impl fmt::Display for AziEquiProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AziEquiProjection({:.6}°,{:.6}°, alt={:.1}m)", self.lla_ref.lat_deg(), self.lla_ref.lon_deg(), self.proj_alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_projects_to_origin() {
        let lla = LatLonAlt::from_degrees( 37.4, -122.1, 1000.0);
        let proj = AziEquiProjection::new( lla);
        let p = proj.project( &lla);
        assert!( p.norm() < 1e-6);
    }

    #[test]
    fn test_pole_reference() {
        let proj = AziEquiProjection::new( LatLonAlt::from_degrees( 90.0, 0.0, 0.0));
        let p = proj.project( &LatLonAlt::from_degrees( 89.0, 0.0, 0.0));
        assert!( (p.norm() - 60.0 * NM).abs() < 1.0);
    }
}
