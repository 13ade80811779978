const LAMINAR_LIMIT: f64 = 2300.0;
const BLASIUS_LIMIT: f64 = 1e5;

/// Darcy friction factor for flow in a tube.
///
/// `64/Re` when laminar, Blasius up to `Re = 1e5`, and the Swamee-Jain
/// explicit form of Colebrook beyond. Returns zero without flow.
#[must_use]
pub fn darcy_friction(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds.is_nan() || reynolds <= 0.0 {
        0.0
    } else if reynolds < LAMINAR_LIMIT {
        64.0 / reynolds
    } else if reynolds < BLASIUS_LIMIT {
        0.316 * reynolds.powf(-0.25)
    } else {
        0.25 / (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9))
            .log10()
            .powi(2)
    }
}

/// Kern shell-side friction factor, `exp(0.576 - 0.19 ln Re)`.
#[must_use]
pub fn kern_shell_friction(reynolds: f64) -> f64 {
    if reynolds > 0.0 {
        (0.576 - 0.19 * reynolds.ln()).exp()
    } else {
        0.0
    }
}

/// Homogeneous two-phase pressure-drop multiplier `1 + x(ρl/ρv - 1)`.
#[must_use]
pub fn homogeneous_multiplier(quality: f64, liquid_density: f64, vapor_density: f64) -> f64 {
    1.0 + quality.clamp(0.0, 1.0) * (liquid_density / vapor_density - 1.0)
}
