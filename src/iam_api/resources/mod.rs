//! Resource-family clients.
//!
//! Each client turns a domain operation into a route plus a parameter set
//! and delegates to a [`RestApi`](crate::iam_api::client::RestApi)
//! implementation, [`IamClient`](crate::iam_api::client::IamClient) by
//! default. Clients borrow or own their core:
//!
//! ```no_run
//! use iam_sdk::{ClientConfig, IamClient, Permission, ResourceClient, RuleClient};
//!
//! # fn example(config: ClientConfig) -> Result<(), iam_sdk::IamError> {
//! let client = IamClient::new(config);
//!
//! ResourceClient::new(&client).create_resource(
//!     "https://pasta.lternet.edu/package/eml/edi/1/1",
//!     "edi.1.1",
//!     "package",
//!     None,
//! )?;
//! RuleClient::new(&client).create_rule(
//!     "https://pasta.lternet.edu/package/eml/edi/1/1",
//!     "EDI-3fa734a7cd6e40998a5c2b5486b6eced",
//!     Permission::Write,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod api_key;
pub mod authorized;
pub mod edi_token;
pub mod eml;
pub mod group;
pub mod profile;
pub mod resource;
pub mod rule;

pub use access::AccessClient;
pub use api_key::ApiKeyClient;
pub use authorized::AuthorizedClient;
pub use edi_token::EdiTokenClient;
pub use eml::EmlClient;
pub use group::GroupClient;
pub use profile::ProfileClient;
pub use resource::{ResourceClient, ResourceTree};
pub use rule::RuleClient;
