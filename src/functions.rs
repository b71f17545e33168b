//! Builtin math functions and named constants.
//!
//! With the default `libm` feature, all functions go through the `libm` crate
//! so results do not depend on the platform's libc; the single- or
//! double-precision entry points are picked to match the active `Real` type.
//! Without it, the standard library's float methods are used instead.

#[cfg(all(feature = "libm", feature = "f32"))]
use libm::{
    acosf as libm_acos, asinf as libm_asin, atanf as libm_atan, ceilf as libm_ceil,
    cosf as libm_cos, coshf as libm_cosh, expf as libm_exp, fabsf as libm_fabs,
    floorf as libm_floor, log10f as libm_log10, logf as libm_ln, powf as libm_pow,
    sinf as libm_sin, sinhf as libm_sinh, sqrtf as libm_sqrt, tanf as libm_tan,
    tanhf as libm_tanh,
};

#[cfg(all(feature = "libm", not(feature = "f32")))]
use libm::{
    acos as libm_acos, asin as libm_asin, atan as libm_atan, ceil as libm_ceil, cos as libm_cos,
    cosh as libm_cosh, exp as libm_exp, fabs as libm_fabs, floor as libm_floor,
    log as libm_ln, log10 as libm_log10, pow as libm_pow, sin as libm_sin, sinh as libm_sinh,
    sqrt as libm_sqrt, tan as libm_tan, tanh as libm_tanh,
};

use crate::constants;
use crate::Real;

/// Look up a named constant, as recognized during number-literal resolution.
pub fn constant(name: &str) -> Option<Real> {
    match name {
        "pi" => Some(constants::PI),
        "e" => Some(constants::E),
        "tau" => Some(constants::TAU),
        _ => None,
    }
}

pub fn sin(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_sin(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.sin()
    }
}

pub fn cos(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_cos(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.cos()
    }
}

pub fn tan(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_tan(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.tan()
    }
}

pub fn asin(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_asin(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.asin()
    }
}

pub fn acos(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_acos(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.acos()
    }
}

pub fn atan(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_atan(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.atan()
    }
}

pub fn sinh(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_sinh(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.sinh()
    }
}

pub fn cosh(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_cosh(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.cosh()
    }
}

pub fn tanh(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_tanh(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.tanh()
    }
}

pub fn exp(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_exp(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.exp()
    }
}

/// Natural logarithm.
pub fn ln(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_ln(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.ln()
    }
}

/// Base-10 logarithm.
pub fn log(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_log10(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.log10()
    }
}

pub fn sqrt(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_sqrt(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.sqrt()
    }
}

pub fn abs(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_fabs(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.abs()
    }
}

pub fn floor(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_floor(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.floor()
    }
}

pub fn ceil(x: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_ceil(x)
    }
    #[cfg(not(feature = "libm"))]
    {
        x.ceil()
    }
}

pub fn pow(base: Real, exponent: Real) -> Real {
    #[cfg(feature = "libm")]
    {
        libm_pow(base, exponent)
    }
    #[cfg(not(feature = "libm"))]
    {
        base.powf(exponent)
    }
}
