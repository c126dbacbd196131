//! Configuration validation.

use jiff::civil::Date;

use crate::{
    diagnostics::Diagnostics,
    permissions::{Permission, PermissionError},
    state::{TokenAttribute, TokenConfig},
    value::Value,
};

/// Check `config` and record an error diagnostic for every problem found.
///
/// Values that are not known yet are skipped; they are checked again once
/// they are.
pub fn validate(config: &TokenConfig, today: Date, diagnostics: &mut Diagnostics) {
    if config.name.trim().is_empty() {
        diagnostics.add_attribute_error(TokenAttribute::Name, "token name must not be empty");
    }

    if let Value::Known(expires) = config.expires
        && expires < today
    {
        diagnostics.add_attribute_error(
            TokenAttribute::Expires,
            format!("expiry date {expires} is in the past"),
        );
    }

    if let Value::Known(repositories) = &config.select_repositories
        && repositories.iter().any(|name| name.trim().is_empty())
    {
        diagnostics.add_attribute_error(
            TokenAttribute::SelectRepositories,
            "repository names must not be empty",
        );
    }

    let read = config.read_permissions.as_known();
    let write = config.write_permissions.as_known();

    for (names, attribute) in [
        (read, TokenAttribute::ReadPermissions),
        (write, TokenAttribute::WritePermissions),
    ] {
        for name in names.into_iter().flatten() {
            if let Err(error) = name.parse::<Permission>() {
                diagnostics.add_attribute_error(attribute, error.to_string());
            }
        }
    }

    if let (Some(read), Some(write)) = (read, write) {
        for name in read.intersection(write) {
            let message = name.parse::<Permission>().map_or_else(
                |error| error.to_string(),
                |permission| PermissionError::Conflicting(permission).to_string(),
            );

            diagnostics.add_attribute_error(TokenAttribute::WritePermissions, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::date;

    use super::*;

    fn set(values: &[&str]) -> Value<BTreeSet<String>> {
        Value::Known(values.iter().map(ToString::to_string).collect())
    }

    fn today() -> Date {
        date(2026, 10, 16)
    }

    #[test]
    fn complete_config_is_valid() {
        let config = TokenConfig {
            expires: Value::Known(date(2026, 12, 1)),
            select_repositories: set(&["org/repo1"]),
            read_permissions: set(&["contents", "metadata"]),
            write_permissions: set(&["issues"]),
            ..TokenConfig::named("ci-token")
        };
        let mut diagnostics = Diagnostics::new();

        validate(&config, today(), &mut diagnostics);

        assert!(diagnostics.is_empty(), "unexpected: {diagnostics:?}");
    }

    #[test]
    fn permission_in_both_sets_is_an_error() {
        let config = TokenConfig {
            read_permissions: set(&["contents"]),
            write_permissions: set(&["contents"]),
            ..TokenConfig::named("ci-token")
        };
        let mut diagnostics = Diagnostics::new();

        validate(&config, today(), &mut diagnostics);

        let errors: Vec<_> = diagnostics.errors().collect();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first().map(|d| d.attribute),
            Some(Some(TokenAttribute::WritePermissions))
        );
    }

    #[test]
    fn every_problem_is_reported() {
        let config = TokenConfig {
            expires: Value::Known(date(2020, 1, 1)),
            select_repositories: set(&[""]),
            read_permissions: set(&["nonsense"]),
            ..TokenConfig::named(" ")
        };
        let mut diagnostics = Diagnostics::new();

        validate(&config, today(), &mut diagnostics);

        let attributes: Vec<_> = diagnostics.iter().filter_map(|d| d.attribute).collect();

        assert_eq!(
            attributes,
            [
                TokenAttribute::Name,
                TokenAttribute::Expires,
                TokenAttribute::SelectRepositories,
                TokenAttribute::ReadPermissions,
            ]
        );
    }

    #[test]
    fn unknown_values_are_skipped() {
        let config = TokenConfig {
            expires: Value::Unknown,
            read_permissions: Value::Unknown,
            ..TokenConfig::named("ci-token")
        };
        let mut diagnostics = Diagnostics::new();

        validate(&config, today(), &mut diagnostics);

        assert!(diagnostics.is_empty());
    }
}
