// DtypeRegistry — String aliases for host dtypes
//
// Maps the names people write in configs and scripts ("torch.float32",
// "torch.half", "binary16", "float") to dtype identifiers. The table is
// assembled in one go by `DtypeRegistry::new`, keeping only the aliases whose
// dtype the host release already has (`DType::since_version`). Once built it is never
// mutated, so the process-wide instance behind `registry()` can be read from
// any thread without locking.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use astype_core::DType;
use log::{debug, warn};

use crate::error::DtypeParseError;
use crate::version::{HostVersion, FEATURE_THRESHOLD};

/// Environment variable that overrides the detected host version.
pub const HOST_VERSION_ENV: &str = "ASTYPE_HOST_VERSION";

/// The language-level numeric kinds registered as `"int"`, `"float"` and
/// `"complex"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Int,
    Float,
    Complex,
}

impl BuiltinType {
    /// The host dtype a builtin kind is cast to.
    pub fn dtype(self) -> DType {
        match self {
            BuiltinType::Int => DType::I64,
            BuiltinType::Float => DType::F64,
            BuiltinType::Complex => DType::C128,
        }
    }
}

/// What an alias resolves to.
///
/// `Builtin` identifiers are distinct from every `Native` one even when
/// they cast to the same dtype: `"int"` is not `"torch.int64"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtypeId {
    Native(DType),
    Builtin(BuiltinType),
}

impl DtypeId {
    /// The host dtype to cast to.
    pub fn dtype(self) -> DType {
        match self {
            DtypeId::Native(dt) => dt,
            DtypeId::Builtin(b) => b.dtype(),
        }
    }
}

impl From<DType> for DtypeId {
    fn from(dt: DType) -> Self {
        DtypeId::Native(dt)
    }
}

impl fmt::Display for DtypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DtypeId::Native(dt) => write!(f, "{dt}"),
            DtypeId::Builtin(BuiltinType::Int) => write!(f, "int"),
            DtypeId::Builtin(BuiltinType::Float) => write!(f, "float"),
            DtypeId::Builtin(BuiltinType::Complex) => write!(f, "complex"),
        }
    }
}

/// Resolves through the process-wide registry.
impl FromStr for DtypeId {
    type Err = DtypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

use DtypeId::{Builtin, Native};

/// Every alias in registration order. Entries whose dtype has a
/// `since_version` are dropped on older hosts.
const ALIASES: &[(&str, DtypeId)] = &[
    ("int", Builtin(BuiltinType::Int)),
    ("torch.uint8", Native(DType::U8)),
    ("torch.int8", Native(DType::I8)),
    ("torch.int16", Native(DType::I16)),
    ("torch.short", Native(DType::I16)),
    ("torch.int32", Native(DType::I32)),
    ("torch.int", Native(DType::I32)),
    ("torch.int64", Native(DType::I64)),
    ("torch.long", Native(DType::I64)),
    ("float", Builtin(BuiltinType::Float)),
    ("torch.float16", Native(DType::F16)),
    ("binary16", Native(DType::F16)),
    ("torch.half", Native(DType::F16)),
    ("torch.float32", Native(DType::F32)),
    ("torch.float", Native(DType::F32)),
    ("torch.float64", Native(DType::F64)),
    ("torch.double", Native(DType::F64)),
    ("complex", Builtin(BuiltinType::Complex)),
    ("torch.complex64", Native(DType::C64)),
    ("torch.cfloat", Native(DType::C64)),
    ("torch.complex128", Native(DType::C128)),
    ("torch.cdouble", Native(DType::C128)),
    ("torch.bool", Native(DType::Bool)),
    ("torch.bfloat16", Native(DType::BF16)),
];

/// Immutable alias table.
#[derive(Debug, Clone)]
pub struct DtypeRegistry {
    /// Registration order.
    entries: Vec<(&'static str, DtypeId)>,
    index: HashMap<&'static str, DtypeId>,
    host_version: String,
    gated_features: bool,
}

impl DtypeRegistry {
    /// Build the table for a host release string.
    ///
    /// Releases below 1.3.0, and strings that do not parse as a version,
    /// lose the aliases of dtypes they predate and log one warning naming
    /// them.
    pub fn new(host_version: &str) -> Self {
        let host = HostVersion::parse(host_version);
        let (entries, missing): (Vec<_>, Vec<_>) =
            ALIASES.iter().copied().partition(|(_, id)| match introduced_in(*id) {
                None => true,
                Some(since) => host.is_some_and(|v| v.at_least(&since)),
            });
        let gated_features = missing.is_empty();

        if !gated_features {
            let names: Vec<&str> = missing.iter().map(|(alias, _)| *alias).collect();
            warn!(
                "Using host version '{host_version}'. Note that {} dtypes were added in version \
                 '{FEATURE_THRESHOLD}'. To use Boolean or BFloat16 dtypes, please upgrade the host library.",
                names.join(" and "),
            );
        }
        let index = entries.iter().copied().collect();

        debug!(
            "dtype registry built for host {host_version}: {} aliases (gated features {})",
            entries.len(),
            if gated_features { "on" } else { "off" },
        );

        DtypeRegistry {
            entries,
            index,
            host_version: host_version.to_string(),
            gated_features,
        }
    }

    /// Build the table for the detected host release: `ASTYPE_HOST_VERSION`
    /// if set, otherwise [`astype_core::version`].
    pub fn detect() -> Self {
        Self::new(&detect_host_version())
    }

    /// Look up an alias. Matching is exact and case-sensitive.
    pub fn resolve(&self, alias: &str) -> Result<DtypeId, DtypeParseError> {
        self.index
            .get(alias)
            .copied()
            .ok_or_else(|| DtypeParseError::new(alias))
    }

    /// Every registered alias, in registration order.
    pub fn available_aliases(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(alias, _)| *alias).collect()
    }

    /// Aliases that resolve to `id`, in registration order.
    pub fn aliases_of(&self, id: impl Into<DtypeId>) -> Vec<&'static str> {
        let id = id.into();
        self.entries
            .iter()
            .filter(|(_, entry)| *entry == id)
            .map(|(alias, _)| *alias)
            .collect()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.index.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The host release string this table was built for.
    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    /// Whether the 1.3.0 aliases (`torch.bool`, `torch.bfloat16`) are present.
    pub fn gated_features_enabled(&self) -> bool {
        self.gated_features
    }
}

/// Host release that introduced the dtype behind `id`, if it is gated.
fn introduced_in(id: DtypeId) -> Option<HostVersion> {
    id.dtype()
        .since_version()
        .map(|(major, minor, patch)| HostVersion::new(major, minor, patch))
}

fn detect_host_version() -> String {
    match std::env::var(HOST_VERSION_ENV) {
        Ok(v) => {
            debug!("host version overridden by {HOST_VERSION_ENV}={v}");
            v
        }
        Err(_) => astype_core::version().to_string(),
    }
}

static REGISTRY: LazyLock<DtypeRegistry> = LazyLock::new(DtypeRegistry::detect);

/// The process-wide registry, built on first use.
pub fn registry() -> &'static DtypeRegistry {
    &REGISTRY
}

/// Resolve an alias against the process-wide registry.
pub fn resolve(alias: &str) -> Result<DtypeId, DtypeParseError> {
    registry().resolve(alias)
}

/// Aliases in the process-wide registry, in registration order.
pub fn available_aliases() -> Vec<&'static str> {
    registry().available_aliases()
}

/// Aliases in the process-wide registry that resolve to `id`.
pub fn aliases_of(id: impl Into<DtypeId>) -> Vec<&'static str> {
    registry().aliases_of(id)
}
