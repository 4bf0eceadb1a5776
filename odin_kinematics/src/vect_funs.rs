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

//! euclidean (flat earth) vector geometry that is shared between the kinematic integrators,
//! [`Position`](crate::position::Position) and the projection bridge

use odin_common::{PI, HALF_PI, sq, sqrt_safe, acos_safe, atan2_safe, sign};
use odin_common::numeric::almost_equals;
use odin_common::angle::turn_delta;
use odin_common::vect::{Vect2, Vect3};
use crate::velocity::Velocity;

/// loss of separation with horizontal distance `d` and vertical distance `h`
pub fn los (so: &Vect3, si: &Vect3, d: f64, h: f64)->bool {
    let s = *so - *si;
    s.x*s.x + s.y*s.y < d*d && s.z.abs() < h
}

/// is `si` on the right side of the line through `so` with direction `vo` (on the line counts as right)
pub fn right_of_line (so: &Vect2, vo: &Vect2, si: &Vect2)->bool {
    (*si - *so).dot( &vo.perp_r()) >= 0.0
}

/// +1 if p is right of the directed line a->b, -1 if left
pub fn right_of_line_points (a: &Vect2, b: &Vect2, p: &Vect2)->i32 {
    let ab = *b - *a;
    let ap = *p - *a;
    sign( ap.x*ab.y - ap.y*ab.x)
}

/// +1 if p is right of the line through s with direction v, -1 if left
#[inline] pub fn on_side (s: &Vect2, v: &Vect2, p: &Vect2)->i32 { sign( (*p - *s).det(v)) }

pub fn collinear_2d (p0: &Vect2, p1: &Vect2, p2: &Vect2)->bool { (*p1 - *p0).det( &(*p2 - *p0)) == 0.0 }

pub fn collinear (p0: &Vect3, p1: &Vect3, p2: &Vect3)->bool {
    let v01 = *p0 - *p1;
    let v02 = *p1 - *p2;
    v01.parallel( &v02)
}

#[inline] pub fn mid_point (p1: &Vect3, p2: &Vect3)->Vect3 { (*p1 + *p2).scal(0.5) }

#[inline] pub fn interpolate (v1: &Vect3, v2: &Vect3, f: f64)->Vect3 { *v1 + (*v2 - *v1).scal(f) }

/// interpolation of the polar components (track, ground speed, vertical speed)
pub fn interpolate_velocity (v1: &Velocity, v2: &Velocity, f: f64)->Velocity {
    let trk = v1.trk() + f*(v2.trk() - v1.trk());
    let gs = v1.gs() + f*(v2.gs() - v1.gs());
    let vs = v1.vs() + f*(v2.vs() - v1.vs());
    Velocity::from_trk_gs_vs( trk, gs, vs)
}

/// signed math angle from v1 to v2
pub fn angle_between_vects (v1: &Vect2, v2: &Vect2)->f64 {
    let a = v1.hat();
    let b = v2.hat();
    atan2_safe( b.y, b.x) - atan2_safe( a.y, a.x)
}

/// unsigned angle at b between a-b and b-c, π if any of the segments is degenerate
pub fn angle_between (a: &Vect2, b: &Vect2, c: &Vect2)->f64 {
    let va = *b - *a;
    let vb = *b - *c;
    let d = va.norm() * vb.norm();
    if d == 0.0 { PI } else { acos_safe( va.dot(&vb) / d) }
}

pub fn divergent_2d (so: &Vect2, vo: &Vect2, si: &Vect2, vi: &Vect2)->bool { (*so - *si).dot( &(*vo - *vi)) > 0.0 }

/// are the two aircraft moving away from each other
pub fn divergent (so: &Vect3, vo: &Velocity, si: &Vect3, vi: &Velocity)->bool {
    (*so - *si).dot( &(vo.vect3() - vi.vect3())) > 0.0
}

pub fn divergent_horiz_gt (s: &Vect2, vo: &Vect2, vi: &Vect2, min_rel_speed: f64)->bool {
    let v = *vo - *vi;
    s.dot(&v) > 0.0 && v.norm() > min_rel_speed
}

pub fn rate_of_closure_horizontal (so: &Vect3, vo: &Velocity, si: &Vect3, vi: &Velocity)->f64 {
    -(*so - *si).vect2().hat().dot( &(vo.vect2() - vi.vect2()))
}

pub fn rate_of_closure_vertical (so: &Vect3, vo: &Velocity, si: &Vect3, vi: &Velocity)->f64 {
    sign( si.z - so.z) as f64 * (vo.z() - vi.z())
}

/// time to closest approach for relative position `s`, f64::MAX if there is no relative motion
pub fn tau (s: &Vect3, vo: &Vect3, vi: &Vect3)->f64 {
    let v = *vo - *vi;
    let nv = v.norm();
    if almost_equals( nv, 0.0) { f64::MAX } else { -s.dot(&v) / (nv*nv) }
}

pub fn tau_2d (s: &Vect2, vo: &Vect2, vi: &Vect2)->f64 {
    let v = *vo - *vi;
    let nv = v.norm();
    if almost_equals( nv, 0.0) { f64::MAX } else { -s.dot(&v) / (nv*nv) }
}

/// distance at closest approach, or the current distance if that lies in the past and `future_only` is set
pub fn dist_at_tau (s: &Vect3, vo: &Vect3, vi: &Vect3, future_only: bool)->f64 {
    let t = tau( s, vo, vi);
    if t < 0.0 && future_only {
        s.norm()
    } else {
        (*s + (*vo - *vi).scal(t)).norm()
    }
}

/// tangent point on a circle with radius `d` around the origin as seen from `s`. `eps` (+1/-1) selects the side.
/// None if `s` is inside the circle
pub fn q_tangent (s: &Vect2, d: f64, eps: i32)->Option<Vect2> {
    let sq_s = s.sqv();
    let sq_d = sq(d);
    let delta = sq_s - sq_d;
    if delta >= 0.0 {
        let alpha = sq_d / sq_s;
        let beta = d * sqrt_safe(delta) / sq_s;
        let eps = eps as f64;
        Some( Vect2::new( alpha*s.x + eps*beta*s.y, alpha*s.y - eps*beta*s.x))
    } else {
        None
    }
}

/* #region intersections *****************************************************************************************/

/// horizontal intersection of two straight tracks and the (signed) time it takes `so` to get there.
/// The altitude follows `so` but is clamped to the altitude range of both tracks. None for parallel tracks
pub fn intersection (so3: &Vect3, vo3: &Velocity, si3: &Vect3, vi3: &Velocity)->Option<(Vect3,f64)> {
    let so = so3.vect2();
    let vo = vo3.vect2();
    let si = si3.vect2();
    let vi = vi3.vect2();
    let ds = si - so;
    let det = vo.det(&vi);
    if det == 0.0 { return None }

    let tt = ds.det(&vi) / det;
    let p = so3.add_scal( tt, &vo3.vect3());
    let z = p.z.min( so3.z.max(si3.z)).max( so3.z.min(si3.z));
    Some( (p.with_z(z), tt))
}

pub fn intersection_2d (so: &Vect2, vo: &Vect2, si: &Vect2, vi: &Vect2)->Option<(Vect2,f64)> {
    let ds = *si - *so;
    let det = vo.det(vi);
    if det == 0.0 { return None }

    let tt = ds.det(vi) / det;
    Some( (so.add_scal( tt, vo), tt))
}

/// intersection of the lines so1-so2 and si1-si2, with the relative time based on flying so1->so2 in `dto`
pub fn intersection_2d_points (so1: &Vect2, so2: &Vect2, dto: f64, si1: &Vect2, si2: &Vect2)->Option<(Vect2,f64)> {
    let vo = (*so2 - *so1).scal( 1.0/dto);
    let vi = (*si2 - *si1).scal( 1.0/dto);
    intersection_2d( so1, &vo, si1, &vi)
}

pub fn time_of_intersection (so3: &Vect3, vo3: &Velocity, si3: &Vect3, vi3: &Velocity)->Option<f64> {
    let vo = vo3.vect2();
    let vi = vi3.vect2();
    let ds = si3.vect2() - so3.vect2();
    let det = vo.det(&vi);
    if det == 0.0 { None } else { Some( ds.det(&vi) / det) }
}

/// intersection of two lines with the altitude averaged between the respective end points that are closest to it
pub fn intersection_avg_z (so1: &Vect3, so2: &Vect3, dto: f64, si1: &Vect3, si2: &Vect3)->Option<(Vect3,f64)> {
    let vo = Velocity::from_points( so1, so2, dto);
    let vi = Velocity::from_points( si1, si2, dto);
    let (x,t) = intersection( so1, &vo, si1, &vi)?;

    let alt_o = if so2.distance_h(&x) < so1.distance_h(&x) { so2.z } else { so1.z };
    let alt_i = if si2.distance_h(&x) < si1.distance_h(&x) { si2.z } else { si1.z };
    Some( (x.with_z( (alt_o + alt_i)/2.0), t))
}

/// intersection point of the two segments and the fraction along so-so2 at which it occurs
pub fn intersect_segments (so: &Vect2, so2: &Vect2, si: &Vect2, si2: &Vect2)->Option<(Vect2,f64)> {
    let vo = *so2 - *so;
    let vi = *si2 - *si;
    let (x,f) = intersection_2d( so, &vo, si, &vi)?;
    if f < 0.0 || f > 1.0 { return None }

    let w = *so - *si;
    let ti = vo.det(&w) / vo.det(&vi);
    if ti < 0.0 || ti > 1.0 { None } else { Some( (x,f)) }
}

/// distance along the ray (si,vi) at which it hits the segment a-b, None if it does not
pub fn intersect_segment (si: &Vect2, vi: &Vect2, a: &Vect2, b: &Vect2)->Option<f64> {
    let theta = vi.trk();
    let ra = rotate( &(*a - *si), -theta);
    let rb = rotate( &(*b - *si), -theta);
    if !((ra.x >= 0.0 && rb.x <= 0.0) || (ra.x <= 0.0 && rb.x >= 0.0)) { return None }

    if ra.x == rb.x {
        if ra.y >= 0.0 || rb.y >= 0.0 { return Some( ra.y.min(rb.y).max(0.0)) }
    } else if ra.y == rb.y {
        if ra.y >= 0.0 { return Some(ra.y) }
    } else if ra.y >= si.y || rb.y >= si.y {
        let m = (rb.x - ra.x) / (rb.y - ra.y);
        let y0 = ra.y - m*ra.x;
        if y0 >= 0.0 { return Some(y0) }
    }
    None
}

/* #endregion intersections */

/* #region closest points ****************************************************************************************/

/// relative time along (s,v) of the point closest to q, and the distance to it
pub fn dist_perp (s: &Vect2, v: &Vect2, q: &Vect2)->(f64,f64) {
    let tp = (*q - *s).dot(v) / v.sqv();
    let dist = (s.add_scal( tp, v) - *q).norm();
    (tp, dist)
}

pub fn closest_point_2d (a: &Vect2, b: &Vect2, so: &Vect2)->Vect2 {
    let ab = *b - *a;
    ab.scal( (*so - *a).dot(&ab) / ab.dot(&ab)) + *a
}

/// closest point in 3d space on the line through a and b
pub fn closest_point_3 (a: &Vect3, b: &Vect3, so: &Vect3)->Vect3 {
    let ab = *b - *a;
    ab.scal( (*so - *a).dot(&ab) / ab.dot(&ab)) + *a
}

/// horizontally closest point on the line through a and b, with the altitude interpolated along a-b.
/// None if a and b are the same point
pub fn closest_point (a: &Vect3, b: &Vect3, so: &Vect3)->Option<Vect3> {
    if a.almost_equals(b) { return None }

    let c = closest_point_2d( &a.vect2(), &b.vect2(), &so.vect2());
    let v = *b - *a;
    let d1 = v.norm_2d();
    let d2 = (c - a.vect2()).norm();
    let d3 = (c - b.vect2()).norm();
    let f = if d3 > d1 && d3 > d2 { -d2/d1 } else { d2/d1 };
    Some( a.add_scal( f, &v))
}

pub fn closest_point_on_segment_2d (a: &Vect2, b: &Vect2, so: &Vect2)->Vect2 {
    let i = closest_point_2d( a, b, so);
    let d1 = a.distance(b);
    let d2 = a.distance(&i);
    let d3 = b.distance(&i);
    if d2 <= d1 && d3 <= d1 { i } else if d2 < d3 { *a } else { *b }
}

pub fn closest_point_on_segment (a: &Vect3, b: &Vect3, so: &Vect3)->Vect3 {
    match closest_point( a, b, so) {
        Some(i) => {
            let d1 = a.distance_h(b);
            let d2 = a.distance_h(&i);
            let d3 = b.distance_h(&i);
            if d2 <= d1 && d3 <= d1 { i } else if d2 < d3 { *a } else { *b }
        }
        None => *a
    }
}

/// closest point on the 3d segment a-b and its fraction along the segment
pub fn closest_point_on_segment_3d_ext (a: &Vect3, b: &Vect3, so: &Vect3)->(Vect3,f64) {
    if a.almost_equals(b) { return (*a, 0.0) }

    let i = closest_point_3( a, b, so);
    let d1 = (*a - *b).norm();
    let d2 = (*a - i).norm();
    let d3 = (*b - i).norm();
    if d2 <= d1 && d3 <= d1 { (i, d2/d1) } else if d2 < d3 { (*a, 0.0) } else { (*b, 1.0) }
}

pub fn distance_to_segment (a: &Vect2, b: &Vect2, so: &Vect2)->f64 {
    so.distance( &closest_point_on_segment_2d( a, b, so))
}

/// passive rotation of p by `angle` (clockwise for positive angles)
pub fn rotate (p: &Vect2, angle: f64)->Vect2 {
    let (s,c) = angle.sin_cos();
    Vect2::new( c*p.x + s*p.y, -s*p.x + c*p.y)
}

/* #endregion closest points */

/// is x behind a point at so that moves with vo
pub fn behind (x: &Vect2, so: &Vect2, vo: &Vect2)->bool {
    turn_delta( vo.trk(), (*x - *so).trk()) > HALF_PI
}

/// +1 if `so` passes in front of `si`, -1 if behind, 0 if the tracks do not cross in the future
pub fn passing_direction (so: &Vect3, vo: &Velocity, si: &Vect3, vi: &Velocity)->i32 {
    match (time_of_intersection( so, vo, si, vi), time_of_intersection( si, vi, so, vo)) {
        (Some(toi), Some(tii)) if toi >= 0.0 && tii >= 0.0 => {
            let so3 = so.linear( &vo.vect3(), toi);
            let si3 = si.linear( &vi.vect3(), toi);
            if behind( &so3.vect2(), &si3.vect2(), &vi.vect2()) { -1 } else { 1 }
        }
        _ => 0
    }
}

/// turn direction for `so` to pass behind `si`, 0 if they are diverging
pub fn dir_for_behind (so: &Vect3, vo: &Velocity, si: &Vect3, vi: &Velocity)->i32 {
    let (so, vo, si, vi) = (so.vect2(), vo.vect2(), si.vect2(), vi.vect2());
    if divergent_2d( &so, &vo, &si, &vi) { 0 }
    else if right_of_line( &si, &vi, &so) { -1 }
    else { 1 }
}

/// normal of the plane through a, b and c
pub fn plane_normal (a: &Vect3, b: &Vect3, c: &Vect3)->Vect3 { (*a - *b).cross( &(*a - *c)) }

/* #region circle tangents ***************************************************************************************/

pub fn internal_center_of_similitude (c1: &Vect2, r1: f64, c2: &Vect2, r2: f64)->Option<Vect2> {
    if c1.distance(c2) < r1 + r2 { return None }
    Some( (c1.scal(r1) + c2.scal(r2)).scal( 1.0/(r1 + r2)))
}

pub fn external_center_of_similitude (c1: &Vect2, r1: f64, c2: &Vect2, r2: f64)->Option<Vect2> {
    if almost_equals( r1, r2) || c1.distance(c2) < r1 + r2 { return None }
    Some( (c2.scal(r1) - c1.scal(r2)).scal( 1.0/(r2 - r1)))
}

fn push_tangents (segments: &mut Vec<(Vect2,Vect2)>, cos: &Vect2, c1: &Vect2, r1: f64, c2: &Vect2, r2: f64) {
    let s1 = *cos - *c1;
    let s2 = *cos - *c2;
    for eps in [1, -1] {
        if let (Some(t1), Some(t2)) = (q_tangent( &s1, r1, eps), q_tangent( &s2, r2, eps)) {
            segments.push( (t1 + *c1, t2 + *c2));
        }
    }
}

/// the (up to four) common tangent segments of two non-overlapping circles, outer tangents first.
/// Empty if the circles overlap
pub fn tangent_segments (c1: &Vect2, r1: f64, c2: &Vect2, r2: f64)->Vec<(Vect2,Vect2)> {
    let mut segments = Vec::with_capacity(4);
    let Some(icos) = internal_center_of_similitude( c1, r1, c2, r2) else { return segments };

    if almost_equals( r1, r2) { // parallel outer tangents
        let l = (*c1 - *c2).perp_l().hat();
        let r = (*c1 - *c2).perp_r().hat();
        segments.push( (c1.add_scal( r1, &l), c2.add_scal( r2, &l)));
        segments.push( (c1.add_scal( r1, &r), c2.add_scal( r2, &r)));
    } else if let Some(ecos) = external_center_of_similitude( c1, r1, c2, r2) {
        push_tangents( &mut segments, &ecos, c1, r1, c2, r2);
    }
    push_tangents( &mut segments, &icos, c1, r1, c2, r2);

    segments
}

/* #endregion circle tangents */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q_inside_circle() {
        assert!( q_tangent( &Vect2::new( 1.0, 1.0), 10.0, 1).is_none());

        let t = q_tangent( &Vect2::new( 0.0, 20.0), 10.0, 1).unwrap();
        assert!( (t.norm() - 10.0).abs() < 1e-9, "{t}");
        assert!( (t - Vect2::new(0.0,20.0)).dot(&t).abs() < 1e-6); // tangent is perpendicular to radius
    }

    #[test]
    fn test_parallel_intersection() {
        let v = Velocity::from_xyz( 1.0, 0.0, 0.0);
        assert!( intersection( &Vect3::ZERO, &v, &Vect3::new(0.0,1.0,0.0), &v).is_none());
    }
}
