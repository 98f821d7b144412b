pub mod tenant;

pub use tenant::{resolve_tenant_middleware, tenant_source, TenantSource};
