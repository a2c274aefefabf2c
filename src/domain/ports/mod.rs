mod clock_port;
mod image_vault_port;
mod object_locator_port;
mod permission_port;
mod texture_backend_port;

pub use clock_port::Clock;
pub use image_vault_port::ImageVault;
pub use object_locator_port::ObjectLocator;
pub use permission_port::PermissionOracle;
pub use texture_backend_port::TextureBackend;
