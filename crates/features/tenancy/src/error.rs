/// Errors raised while resolving a tenant configuration.
#[mplan_derive::planner_error]
pub enum TenancyError {
    /// Neither the resolved tenant nor the configured default is registered.
    #[error("Default plugin with tenant ID \"{tenant_id}\" not found in registry")]
    DefaultTenantMissing { tenant_id: String },
}
