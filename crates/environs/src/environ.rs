// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0

//! Live environments and the provisioning operations they may support.

use crate::config::Config;
use crate::Error;

/// Identifier of a compute instance within an environment.
pub type InstanceId = String;

/// Provisioning operations an environ may decline to support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Operation {
    Bootstrap,
    StartInstance,
    StopInstances,
    AllInstances,
    Destroy,
    PublicAddress,
    PrivateAddress,
}

/// A configured environment backed by some provider.
///
/// Provisioning methods default to [`Error::Unsupported`]; backends override
/// the ones they implement.
pub trait Environ: Send + Sync + std::fmt::Debug {
    /// The provider type this environ belongs to.
    fn provider_name(&self) -> &str;

    fn name(&self) -> &str;

    /// The currently held, validated config.
    fn config(&self) -> Config;

    /// Validate `cfg` as a change from the held config and replace it.
    ///
    /// On failure the held config is left as it was.
    fn set_config(&self, cfg: &Config) -> crate::Result<()>;

    fn bootstrap(&self) -> crate::Result<()> {
        Err(unsupported(self, Operation::Bootstrap))
    }

    fn start_instance(&self, _machine_id: &str) -> crate::Result<InstanceId> {
        Err(unsupported(self, Operation::StartInstance))
    }

    fn stop_instances(&self, _ids: &[InstanceId]) -> crate::Result<()> {
        Err(unsupported(self, Operation::StopInstances))
    }

    fn all_instances(&self) -> crate::Result<Vec<InstanceId>> {
        Err(unsupported(self, Operation::AllInstances))
    }

    fn destroy(&self) -> crate::Result<()> {
        Err(unsupported(self, Operation::Destroy))
    }

    /// Address of the instance this code runs on, as seen from outside.
    fn public_address(&self) -> crate::Result<String> {
        Err(unsupported(self, Operation::PublicAddress))
    }

    /// Address of the instance this code runs on, within the environment.
    fn private_address(&self) -> crate::Result<String> {
        Err(unsupported(self, Operation::PrivateAddress))
    }
}

fn unsupported<E: Environ + ?Sized>(env: &E, operation: Operation) -> Error {
    Error::Unsupported {
        provider: env.provider_name().to_string(),
        operation,
    }
}
