mod device_code;
mod token;

pub use device_code::{DeviceCode, DEFAULT_VERIFICATION_URL};
pub use token::{AuthToken, REFRESH_MARGIN, TOKEN_KIND};
