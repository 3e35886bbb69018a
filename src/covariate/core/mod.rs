//! covariate::core: data, base families, native parameters and priors.
//!
//! Building blocks shared by every covariate model:
//! - [`data`]: the validated observation/covariate pair ([`CovariateData`]).
//! - [`family`]: point-wise `logpdf`/`cdf`/`sf`/`ppf`/`isf` for the base
//!   families ([`Family`], [`NativePoint`]).
//! - [`native`]: the tagged transform result ([`NativeParams`]).
//! - [`prior`]: the optional log-prior term ([`Prior`]).

pub mod data;
pub mod family;
pub mod native;
pub mod prior;

pub use self::data::CovariateData;
pub use self::family::{Family, NativePoint};
pub use self::native::NativeParams;
pub use self::prior::Prior;
