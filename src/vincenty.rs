//! Geodesic distance on the WGS84 ellipsoid (Vincenty's inverse formula, 1975).

use crate::errors::{GridError, Result};
use tracing::warn;

/// WGS84 semi-major axis (m)
pub const WGS84_A: f64 = 6378137.0;
/// WGS84 semi-minor axis (m)
pub const WGS84_B: f64 = 6356752.314245;
/// WGS84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257223563;

/// Convergence threshold on the reduced longitude difference (radians).
pub const CONVERGENCE_THRESHOLD: f64 = 1e-12;
/// Upper bound on fixed-point iterations; near-antipodal points may never converge.
pub const MAX_ITERATIONS: usize = 1000;

/// Distance in meters between two points given in degrees.
pub fn vincenty_distance(
    latitude1: f64,
    longitude1: f64,
    latitude2: f64,
    longitude2: f64,
) -> Result<f64> {
    let f = WGS84_F;
    let l = (longitude1 - longitude2).to_radians();
    let u1 = ((1.0 - f) * latitude1.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * latitude2.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut iterations = 0;

    let (sigma, sin_sigma, cos_sigma, cos2_alpha, cos_2sigma_m) = loop {
        if iterations == MAX_ITERATIONS {
            warn!(
                "Vincenty did not converge: ({}, {}) -> ({}, {})",
                latitude1, longitude1, latitude2, longitude2
            );
            return Err(GridError::NonconvergentGeodesic { iterations });
        }
        iterations += 1;

        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let cs = cos_u2 * sin_lambda;
        let cscc = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = (cs * cs + cscc * cscc).sqrt();
        if sin_sigma == 0.0 {
            // coincident points
            return Ok(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos2_alpha = 1.0 - sin_alpha * sin_alpha;

        let (next_lambda, cos_2sigma_m) = if cos2_alpha == 0.0 {
            (l + f * sin_alpha * sigma, None)
        } else {
            let cos_2sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos2_alpha;
            let c = f / 16.0 * cos2_alpha * (4.0 + f * (4.0 - 3.0 * cos2_alpha));
            let next = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
            (next, Some(cos_2sigma_m))
        };

        let delta = next_lambda - lambda;
        lambda = next_lambda;
        if delta.abs() <= CONVERGENCE_THRESHOLD {
            break (sigma, sin_sigma, cos_sigma, cos2_alpha, cos_2sigma_m);
        }
    };

    // Equatorial lines skip the curvature correction
    let (a, delta_sigma) = match cos_2sigma_m {
        None => (1.0, 0.0),
        Some(cos_2sigma_m) => {
            let u_sq = cos2_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
            let a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = b
                * sin_sigma
                * (cos_2sigma_m
                    + 0.25
                        * b
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                            - b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
            (a, delta_sigma)
        }
    };

    Ok(WGS84_B * a * (sigma - delta_sigma))
}
