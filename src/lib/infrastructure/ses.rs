//! Amazon SES Query API provider

mod client;
mod params;
mod provider;

pub use client::{HttpQueryClient, QueryClient, SesConfig};
pub use params::{QueryParams, API_VERSION};
pub use provider::SesProvider;

#[cfg(test)]
pub mod tests {
    pub use super::client::MockQueryClient;
}
