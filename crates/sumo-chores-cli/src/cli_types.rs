use clap::ValueEnum;

use sumo_chores_platform::RoleResolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliRoleResolution {
    Auto,
    PerUser,
    Inline,
}

impl From<CliRoleResolution> for RoleResolution {
    fn from(value: CliRoleResolution) -> Self {
        match value {
            CliRoleResolution::Auto => RoleResolution::Auto,
            CliRoleResolution::PerUser => RoleResolution::PerUser,
            CliRoleResolution::Inline => RoleResolution::Inline,
        }
    }
}
