//! Process-wide configuration of how usage errors are surfaced.
//!
//! The initial policy is read once from the `XVIEW_ERROR_POLICY`
//! environment variable and can be changed at run time with
//! [`set_policy`].
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Environment variable holding the initial report policy.
pub const POLICY_ENV: &str = "XVIEW_ERROR_POLICY";

/// What the default sink does with a usage error when neither a
/// redirect nor a custom sink is installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReportPolicy {
    /// Emit the message through `log::error!`.
    #[default]
    Log = 0,
    /// Panic with the message.
    Panic = 1,
    /// Drop the message.
    Silent = 2,
}

impl ReportPolicy {
    /// Read the policy from [`POLICY_ENV`].
    /// Missing variable means [`ReportPolicy::Log`], so does an
    /// unrecognized value, which is warned about.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(POLICY_ENV).ok().as_deref())
    }

    /// Policy for a raw value of [`POLICY_ENV`], `None` if unset.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(s) => s.parse().unwrap_or_else(|e| {
                log::warn!("{}: {}, falling back to log", POLICY_ENV, e);
                ReportPolicy::Log
            }),
            None => ReportPolicy::Log,
        }
    }

    #[inline]
    fn from_u8(v: u8) -> Self {
        match v {
            1 => ReportPolicy::Panic,
            2 => ReportPolicy::Silent,
            _ => ReportPolicy::Log,
        }
    }
}

impl FromStr for ReportPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("log") {
            Ok(ReportPolicy::Log)
        } else if s.eq_ignore_ascii_case("panic") {
            Ok(ReportPolicy::Panic)
        } else if s.eq_ignore_ascii_case("silent") {
            Ok(ReportPolicy::Silent)
        } else {
            Err(Error::InvalidArgument(format!(
                "unknown report policy '{}'",
                s
            )))
        }
    }
}

impl fmt::Display for ReportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportPolicy::Log => "log",
            ReportPolicy::Panic => "panic",
            ReportPolicy::Silent => "silent",
        };
        f.write_str(s)
    }
}

static POLICY: Lazy<AtomicU8> = Lazy::new(|| AtomicU8::new(ReportPolicy::from_env() as u8));

/// Returns current report policy.
#[inline]
pub fn policy() -> ReportPolicy {
    ReportPolicy::from_u8(POLICY.load(Ordering::Relaxed))
}

/// Replace the report policy, returning the previous one.
#[inline]
pub fn set_policy(policy: ReportPolicy) -> ReportPolicy {
    ReportPolicy::from_u8(POLICY.swap(policy as u8, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!(ReportPolicy::Log, "log".parse().unwrap());
        assert_eq!(ReportPolicy::Panic, " PANIC ".parse().unwrap());
        assert_eq!(ReportPolicy::Silent, "Silent".parse().unwrap());
        let res = "abort".parse::<ReportPolicy>();
        assert_eq!(
            Err(Error::InvalidArgument(
                "unknown report policy 'abort'".to_string()
            )),
            res
        );
    }

    #[test]
    fn test_policy_display_round_trip() {
        for p in [ReportPolicy::Log, ReportPolicy::Panic, ReportPolicy::Silent] {
            assert_eq!(p, p.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_from_u8_defaults_to_log() {
        assert_eq!(ReportPolicy::Log, ReportPolicy::from_u8(0));
        assert_eq!(ReportPolicy::Panic, ReportPolicy::from_u8(1));
        assert_eq!(ReportPolicy::Silent, ReportPolicy::from_u8(2));
        assert_eq!(ReportPolicy::Log, ReportPolicy::from_u8(42));
    }

    #[test]
    fn test_policy_from_env_value() {
        assert_eq!(ReportPolicy::Log, ReportPolicy::from_env_value(None));
        assert_eq!(ReportPolicy::Panic, ReportPolicy::from_env_value(Some("panic")));
        assert_eq!(ReportPolicy::Silent, ReportPolicy::from_env_value(Some(" SILENT")));
        assert_eq!(ReportPolicy::Log, ReportPolicy::from_env_value(Some("abort")));
        assert_eq!(ReportPolicy::Log, ReportPolicy::from_env_value(Some("")));
    }

    #[test]
    fn test_set_policy() {
        let prev = set_policy(ReportPolicy::Silent);
        assert_eq!(ReportPolicy::Silent, policy());
        assert_eq!(ReportPolicy::Silent, set_policy(prev));
    }
}
