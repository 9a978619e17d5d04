/// Angle in degrees at vertex `b` between rays b->a and b->c.
///
/// Computed as the difference of the two atan2 bearings, reflected so the
/// result always lies in [0, 180]. Degenerate input (coincident points)
/// yields a defined value since atan2(0, 0) == 0.
pub fn joint_angle(a: (i32, i32), b: (i32, i32), c: (i32, i32)) -> f64 {
    let ang = ((c.1 - b.1) as f64).atan2((c.0 - b.0) as f64)
        - ((a.1 - b.1) as f64).atan2((a.0 - b.0) as f64);
    let ang = ang.to_degrees().abs();
    if ang > 180.0 {
        360.0 - ang
    } else {
        ang
    }
}
