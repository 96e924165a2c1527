//! Compromise registry.
//!
//! Statically embedded table of npm packages published with the Shai-Hulud
//! worm payload (September 2025), plus the packages hijacked in the
//! co-timed `chalk` / `debug` maintainer phishing campaign. No network call
//! is ever made: the table ships with the binary and is updated by releasing
//! a new version.
//!
//! Matching is exact and case-sensitive for both the package name and the
//! version. Scoped names such as `@ctrl/tinycolor` are single keys. There is
//! no semver range logic: `4.1.1` and `4.1.1.0` are different versions.
//!
//! ```
//! use shai_hulud_audit::registry;
//!
//! assert!(registry::is_compromised_version("@ctrl/tinycolor", "4.1.1"));
//! assert!(!registry::is_compromised_version("@ctrl/tinycolor", "4.1.3"));
//! assert!(registry::is_tracked_package("@ctrl/tinycolor"));
//! assert!(!registry::is_tracked_package("left-pad"));
//! ```

use regex::Regex;
use std::sync::LazyLock;

/// SHA-256 of the `bundle.js` payload dropped by the worm.
pub const MALICIOUS_BUNDLE_SHA256: &str =
    "46faab8ab153fae6e80e7cca38eab363075bb524edd79e42269217a083628f09";

/// One tracked package and the exact versions known to carry the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompromisedVersionSet {
    pub package: &'static str,
    pub versions: &'static [&'static str],
}

// Sorted ascending by name for binary search. The unit tests below fail if
// an entry is added out of order.
#[rustfmt::skip]
static COMPROMISED_PACKAGES: &[(&str, &[&str])] = &[
    ("@ahmedhfarag/ngx-perfect-scrollbar", &["20.0.20"]),
    ("@ahmedhfarag/ngx-virtual-scroller", &["4.0.4"]),
    ("@art-ws/common", &["2.0.28"]),
    ("@art-ws/config-eslint", &["2.0.4", "2.0.5"]),
    ("@art-ws/config-ts", &["2.0.7", "2.0.8"]),
    ("@art-ws/db-context", &["2.0.24"]),
    ("@art-ws/di", &["2.0.28", "2.0.32"]),
    ("@art-ws/di-node", &["2.0.13"]),
    ("@art-ws/eslint", &["1.0.5", "1.0.6"]),
    ("@art-ws/fastify-http-server", &["2.0.24", "2.0.27"]),
    ("@art-ws/http-server", &["2.0.21", "2.0.25"]),
    ("@art-ws/openapi", &["0.1.12", "0.1.9"]),
    ("@art-ws/package-base", &["1.0.5", "1.0.6"]),
    ("@art-ws/prettier", &["1.0.5", "1.0.6"]),
    ("@art-ws/slf", &["2.0.15", "2.0.22"]),
    ("@art-ws/ssl-info", &["1.0.10", "1.0.9"]),
    ("@art-ws/web-app", &["1.0.3", "1.0.4"]),
    ("@coveops/abi", &["2.0.1"]),
    ("@crowdstrike/commitlint", &["8.1.1", "8.1.2"]),
    ("@crowdstrike/falcon-shoelace", &["0.4.1", "0.4.2"]),
    ("@crowdstrike/foundry-js", &["0.19.1", "0.19.2"]),
    ("@crowdstrike/glide-core", &["0.34.2", "0.34.3"]),
    ("@crowdstrike/logscale-dashboard", &["1.205.1", "1.205.2"]),
    ("@crowdstrike/logscale-file-editor", &["1.205.1", "1.205.2"]),
    ("@crowdstrike/logscale-parser-edit", &["1.205.1", "1.205.2"]),
    ("@crowdstrike/logscale-search", &["1.205.1", "1.205.2"]),
    ("@crowdstrike/tailwind-toucan-base", &["5.0.1", "5.0.2"]),
    ("@ctrl/deluge", &["7.2.2", "7.2.1"]),
    ("@ctrl/golang-template", &["1.4.3", "1.4.2"]),
    ("@ctrl/magnet-link", &["4.0.4", "4.0.3"]),
    ("@ctrl/ngx-codemirror", &["7.0.2", "7.0.1"]),
    ("@ctrl/ngx-csv", &["6.0.2", "6.0.1"]),
    ("@ctrl/ngx-emoji-mart", &["9.2.2", "9.2.1"]),
    ("@ctrl/ngx-rightclick", &["4.0.2", "4.0.1"]),
    ("@ctrl/qbittorrent", &["9.7.2", "9.7.1"]),
    ("@ctrl/react-adsense", &["2.0.2", "2.0.1"]),
    ("@ctrl/shared-torrent", &["6.3.2", "6.3.1"]),
    ("@ctrl/tinycolor", &["4.1.1", "4.1.2"]),
    ("@ctrl/torrent-file", &["4.1.2", "4.1.1"]),
    ("@ctrl/transmission", &["7.3.1"]),
    ("@ctrl/ts-base32", &["4.0.2", "4.0.1"]),
    ("@duckdb/duckdb-wasm", &["1.29.2"]),
    ("@duckdb/node-api", &["1.3.3"]),
    ("@duckdb/node-bindings", &["1.3.3"]),
    ("@hestjs/core", &["0.2.1"]),
    ("@hestjs/cqrs", &["0.1.6"]),
    ("@hestjs/demo", &["0.1.2"]),
    ("@hestjs/eslint-config", &["0.1.2"]),
    ("@hestjs/logger", &["0.1.6"]),
    ("@hestjs/scalar", &["0.1.7"]),
    ("@hestjs/validation", &["0.1.6"]),
    ("@nativescript-community/arraybuffers", &["1.1.6", "1.1.7", "1.1.8"]),
    ("@nativescript-community/gesturehandler", &["2.0.35"]),
    ("@nativescript-community/perms", &["3.0.5", "3.0.6", "3.0.7", "3.0.8", "3.0.9"]),
    ("@nativescript-community/sentry", &["4.6.43"]),
    ("@nativescript-community/sqlite", &["3.5.2", "3.5.3", "3.5.4", "3.5.5"]),
    ("@nativescript-community/text", &["1.6.13", "1.6.10", "1.6.11", "1.6.12", "1.6.9"]),
    ("@nativescript-community/typeorm", &["0.2.30", "0.2.31", "0.2.32", "0.2.33"]),
    ("@nativescript-community/ui-collectionview", &["6.0.6"]),
    ("@nativescript-community/ui-document-picker", &["1.1.27", "1.1.28", "13.0.32"]),
    ("@nativescript-community/ui-drawer", &["0.1.30"]),
    ("@nativescript-community/ui-image", &["4.5.6"]),
    ("@nativescript-community/ui-label", &["1.3.35", "1.3.36", "1.3.37"]),
    ("@nativescript-community/ui-material-bottom-navigation", &["7.2.72", "7.2.73", "7.2.74", "7.2.75"]),
    ("@nativescript-community/ui-material-bottomsheet", &["7.2.72"]),
    ("@nativescript-community/ui-material-core", &["7.2.76", "7.2.72", "7.2.73", "7.2.74", "7.2.75"]),
    ("@nativescript-community/ui-material-core-tabs", &["7.2.76", "7.2.72", "7.2.73", "7.2.74", "7.2.75"]),
    ("@nativescript-community/ui-material-ripple", &["7.2.72", "7.2.73", "7.2.74", "7.2.75"]),
    ("@nativescript-community/ui-material-tabs", &["7.2.72", "7.2.73", "7.2.74", "7.2.75"]),
    ("@nativescript-community/ui-pager", &["14.1.36", "14.1.37", "14.1.38"]),
    ("@nativescript-community/ui-pulltorefresh", &["2.5.4", "2.5.5", "2.5.6", "2.5.7"]),
    ("@nexe/config-manager", &["0.1.1"]),
    ("@nexe/eslint-config", &["0.1.1"]),
    ("@nexe/logger", &["0.1.3"]),
    ("@nstudio/angular", &["20.0.4", "20.0.5", "20.0.6"]),
    ("@nstudio/focus", &["20.0.4", "20.0.5", "20.0.6"]),
    ("@nstudio/nativescript-checkbox", &["2.0.6", "2.0.7", "2.0.8", "2.0.9"]),
    ("@nstudio/nativescript-loading-indicator", &["5.0.1", "5.0.2", "5.0.3", "5.0.4"]),
    ("@nstudio/ui-collectionview", &["5.1.11", "5.1.12", "5.1.13", "5.1.14"]),
    ("@nstudio/web", &["20.0.4"]),
    ("@nstudio/web-angular", &["20.0.4"]),
    ("@nstudio/xplat", &["20.0.5", "20.0.6", "20.0.7"]),
    ("@nstudio/xplat-utils", &["20.0.5", "20.0.6", "20.0.7"]),
    ("@operato/board", &["9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46"]),
    ("@operato/data-grist", &["9.0.29", "9.0.35", "9.0.36", "9.0.37"]),
    ("@operato/graphql", &["9.0.22", "9.0.35", "9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46"]),
    ("@operato/headroom", &["9.0.2", "9.0.35", "9.0.36", "9.0.37"]),
    ("@operato/help", &["9.0.35", "9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46"]),
    ("@operato/i18n", &["9.0.35", "9.0.36", "9.0.37"]),
    ("@operato/input", &["9.0.27", "9.0.35", "9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46", "9.0.47", "9.0.48"]),
    ("@operato/layout", &["9.0.35", "9.0.36", "9.0.37"]),
    ("@operato/popup", &["9.0.22", "9.0.35", "9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46", "9.0.49"]),
    ("@operato/pull-to-refresh", &["9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42"]),
    ("@operato/shell", &["9.0.22", "9.0.35", "9.0.36", "9.0.37", "9.0.38", "9.0.39"]),
    ("@operato/styles", &["9.0.2", "9.0.35", "9.0.36", "9.0.37"]),
    ("@operato/utils", &["9.0.22", "9.0.35", "9.0.36", "9.0.37", "9.0.38", "9.0.39", "9.0.40", "9.0.41", "9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46", "9.0.49"]),
    ("@teselagen/bio-parsers", &["0.4.29", "0.4.30"]),
    ("@teselagen/bounce-loader", &["0.3.16", "0.3.17"]),
    ("@teselagen/file-utils", &["0.3.21", "0.3.22"]),
    ("@teselagen/liquibase-tools", &["0.4.1"]),
    ("@teselagen/ove", &["0.7.39", "0.7.40"]),
    ("@teselagen/range-utils", &["0.3.14", "0.3.15"]),
    ("@teselagen/react-list", &["0.8.19", "0.8.20"]),
    ("@teselagen/react-table", &["6.10.21", "6.10.19", "6.10.20", "6.10.22"]),
    ("@teselagen/sequence-utils", &["0.3.33", "0.3.34"]),
    ("@teselagen/ui", &["0.9.9", "0.9.10"]),
    ("@thangved/callback-window", &["1.1.4"]),
    ("@things-factory/attachment-base", &["9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46", "9.0.47", "9.0.48", "9.0.49", "9.0.50", "9.0.51", "9.0.52", "9.0.53", "9.0.54", "9.0.55"]),
    ("@things-factory/auth-base", &["9.0.42", "9.0.43", "9.0.44", "9.0.45"]),
    ("@things-factory/email-base", &["9.0.42", "9.0.43", "9.0.44", "9.0.45", "9.0.46", "9.0.47", "9.0.48", "9.0.49", "9.0.50", "9.0.51", "9.0.52", "9.0.53", "9.0.54", "9.0.55", "9.0.56", "9.0.57", "9.0.58", "9.0.59"]),
    ("@things-factory/env", &["9.0.42", "9.0.43", "9.0.44", "9.0.45"]),
    ("@things-factory/integration-base", &["9.0.42", "9.0.43", "9.0.44", "9.0.45"]),
    ("@things-factory/integration-marketplace", &["9.0.42", "9.0.43", "9.0.44", "9.0.45"]),
    ("@things-factory/shell", &["9.0.42", "9.0.43", "9.0.44", "9.0.45"]),
    ("@tnf-dev/api", &["1.0.8"]),
    ("@tnf-dev/core", &["1.0.8"]),
    ("@tnf-dev/js", &["1.0.8"]),
    ("@tnf-dev/mui", &["1.0.8"]),
    ("@tnf-dev/react", &["1.0.8"]),
    ("@ui-ux-gang/devextreme-angular-rpk", &["24.1.7"]),
    ("@yoobic/design-system", &["6.5.17"]),
    ("@yoobic/jpeg-camera-es6", &["1.0.13"]),
    ("@yoobic/yobi", &["8.7.53"]),
    ("airchief", &["0.3.1"]),
    ("airpilot", &["0.8.8"]),
    ("angulartics2", &["14.1.2", "14.1.1"]),
    ("ansi-regex", &["6.2.1"]),
    ("ansi-styles", &["6.2.2"]),
    ("backslash", &["0.2.1"]),
    ("browser-webdriver-downloader", &["3.0.8"]),
    ("capacitor-notificationhandler", &["0.0.2", "0.0.3"]),
    ("capacitor-plugin-healthapp", &["0.0.2", "0.0.3"]),
    ("capacitor-plugin-ihealth", &["1.1.8", "1.1.9"]),
    ("capacitor-plugin-vonage", &["1.0.2", "1.0.3"]),
    ("capacitorandroidpermissions", &["0.0.4", "0.0.5"]),
    ("chalk", &["5.6.1"]),
    ("chalk-template", &["1.1.1"]),
    ("color-convert", &["3.1.1"]),
    ("color-name", &["2.0.1"]),
    ("color-string", &["2.1.1"]),
    ("config-cordova", &["0.8.5"]),
    ("cordova-plugin-voxeet2", &["1.0.24"]),
    ("cordova-voxeet", &["1.0.32"]),
    ("create-hest-app", &["0.1.9"]),
    ("db-evo", &["1.1.4", "1.1.5"]),
    ("debug", &["4.4.2"]),
    ("devextreme-angular-rpk", &["21.2.8"]),
    ("duckdb", &["1.3.3"]),
    ("ember-browser-services", &["5.0.2", "5.0.3"]),
    ("ember-headless-form", &["1.1.2", "1.1.3"]),
    ("ember-headless-form-yup", &["1.0.1"]),
    ("ember-headless-table", &["2.1.5", "2.1.6"]),
    ("ember-url-hash-polyfill", &["1.0.12", "1.0.13"]),
    ("ember-velcro", &["2.2.1", "2.2.2"]),
    ("encounter-playground", &["0.0.4", "0.0.5", "0.0.2", "0.0.3"]),
    ("error-ex", &["1.3.3"]),
    ("eslint-config-crowdstrike", &["11.0.2", "11.0.3"]),
    ("eslint-config-crowdstrike-node", &["4.0.3", "4.0.4"]),
    ("eslint-config-teselagen", &["6.1.7", "6.1.8"]),
    ("globalize-rpk", &["1.7.4"]),
    ("graphql-sequelize-teselagen", &["5.3.8", "5.3.9"]),
    ("has-ansi", &["6.0.1"]),
    ("html-to-base64-image", &["1.0.2"]),
    ("is-arrayish", &["0.3.3"]),
    ("json-rules-engine-simplified", &["0.2.3", "0.2.4", "0.2.1"]),
    ("jumpgate", &["0.0.2"]),
    ("koa2-swagger-ui", &["5.11.2", "5.11.1"]),
    ("mcfly-semantic-release", &["1.3.1"]),
    ("mcp-knowledge-base", &["0.0.2"]),
    ("mcp-knowledge-graph", &["1.2.1"]),
    ("mobioffice-cli", &["1.0.3"]),
    ("monorepo-next", &["13.0.1", "13.0.2"]),
    ("mstate-angular", &["0.4.4"]),
    ("mstate-cli", &["0.4.7"]),
    ("mstate-dev-react", &["1.1.1"]),
    ("mstate-react", &["1.6.5"]),
    ("ng2-file-upload", &["8.0.3", "7.0.2", "7.0.3", "8.0.1", "8.0.2", "9.0.1"]),
    ("ngx-bootstrap", &["18.1.4", "19.0.3", "20.0.4", "20.0.5", "20.0.6", "19.0.4", "20.0.3"]),
    ("ngx-color", &["10.0.2", "10.0.1"]),
    ("ngx-toastr", &["19.0.2", "19.0.1"]),
    ("ngx-trend", &["8.0.1"]),
    ("ngx-ws", &["1.1.5", "1.1.6"]),
    ("oradm-to-gql", &["35.0.14", "35.0.15"]),
    ("oradm-to-sqlz", &["1.1.4", "1.1.2"]),
    ("ove-auto-annotate", &["0.0.9", "0.0.10"]),
    ("pm2-gelf-json", &["1.0.4", "1.0.5"]),
    ("prebid-universal-creative", &["1.17.3"]),
    ("prebid.js", &["10.9.1", "10.9.2"]),
    ("printjs-rpk", &["1.6.1"]),
    ("proto-tinker-wc", &["0.1.87"]),
    ("react-complaint-image", &["0.0.34", "0.0.35", "0.0.32"]),
    ("react-jsonschema-form-conditionals", &["0.3.20", "0.3.21", "0.3.18"]),
    ("react-jsonschema-form-extras", &["1.0.3", "1.0.4"]),
    ("react-jsonschema-rxnt-extras", &["0.4.8", "0.4.9"]),
    ("remark-preset-lint-crowdstrike", &["4.0.1", "4.0.2"]),
    ("rxnt-authentication", &["0.0.5", "0.0.6", "0.0.3", "0.0.4"]),
    ("rxnt-healthchecks-nestjs", &["1.0.4", "1.0.5", "1.0.2", "1.0.3"]),
    ("rxnt-kue", &["1.0.6", "1.0.7", "1.0.4", "1.0.5"]),
    ("simple-swizzle", &["0.2.3"]),
    ("slice-ansi", &["7.1.1"]),
    ("strip-ansi", &["7.1.1"]),
    ("supports-color", &["10.2.1"]),
    ("supports-hyperlinks", &["4.1.1"]),
    ("swc-plugin-component-annotate", &["1.9.2", "1.9.1"]),
    ("tbssnch", &["1.0.2"]),
    ("teselagen-interval-tree", &["1.1.2"]),
    ("tg-client-query-builder", &["2.14.4", "2.14.5"]),
    ("tg-redbird", &["1.3.1", "1.3.2"]),
    ("tg-seq-gen", &["1.0.9", "1.0.10"]),
    ("thangved-react-grid", &["1.0.3"]),
    ("ts-gaussian", &["3.0.6", "3.0.5"]),
    ("ts-imports", &["1.0.1", "1.0.2"]),
    ("tvi-cli", &["0.1.5"]),
    ("ve-bamreader", &["0.2.6", "0.2.7"]),
    ("ve-editor", &["1.0.1", "1.0.2"]),
    ("verror-extra", &["6.0.1"]),
    ("voip-callkit", &["1.0.2", "1.0.3"]),
    ("wdio-web-reporter", &["0.1.3"]),
    ("wrap-ansi", &["9.0.1"]),
    ("yargs-help-output", &["5.0.3"]),
    ("yoo-styles", &["6.0.326"]),
];

// npm package-name grammar: optional `@scope/`, lowercase, URL-safe characters.
static RE_PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9~-][a-z0-9._~-]*/)?[a-z0-9~-][a-z0-9._~-]*$").unwrap()
});

fn lookup(package: &str) -> Option<&'static [&'static str]> {
    COMPROMISED_PACKAGES
        .binary_search_by(|(name, _)| (*name).cmp(package))
        .ok()
        .map(|idx| COMPROMISED_PACKAGES[idx].1)
}

/// Returns `true` if `package` has at least one known-compromised version.
pub fn is_tracked_package(package: &str) -> bool {
    lookup(package).is_some()
}

/// Returns `true` if `version` of `package` is known to be compromised.
pub fn is_compromised_version(package: &str, version: &str) -> bool {
    lookup(package).is_some_and(|versions| versions.contains(&version))
}

/// Returns the compromised versions recorded for `package`, if it is tracked.
pub fn compromised_versions(package: &str) -> Option<&'static [&'static str]> {
    lookup(package)
}

/// Iterates over every tracked package in name order.
pub fn entries() -> impl Iterator<Item = CompromisedVersionSet> {
    COMPROMISED_PACKAGES
        .iter()
        .map(|&(package, versions)| CompromisedVersionSet { package, versions })
}

/// Number of tracked packages.
pub fn len() -> usize {
    COMPROMISED_PACKAGES.len()
}

/// Returns `true` if `name` is a syntactically valid npm package name.
///
/// Used by the `lookup` command to reject typos such as `@ctrl tinycolor`
/// before reporting "not tracked".
///
/// ```
/// use shai_hulud_audit::registry::is_valid_package_name;
///
/// assert!(is_valid_package_name("@ctrl/tinycolor"));
/// assert!(is_valid_package_name("prebid.js"));
/// assert!(!is_valid_package_name("@ctrl/"));
/// assert!(!is_valid_package_name("Has Spaces"));
/// ```
pub fn is_valid_package_name(name: &str) -> bool {
    name.len() <= 214 && RE_PACKAGE_NAME.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in COMPROMISED_PACKAGES.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "registry out of order: {:?} must sort before {:?}",
                pair[0].0,
                pair[1].0
            );
        }
    }

    #[test]
    fn every_key_is_a_valid_package_name() {
        for (name, versions) in COMPROMISED_PACKAGES {
            assert!(is_valid_package_name(name), "invalid package name: {name}");
            assert!(!versions.is_empty(), "{name} has no versions");
        }
    }

    #[test]
    fn scoped_names_are_atomic_keys() {
        assert!(is_tracked_package("@ctrl/tinycolor"));
        assert!(!is_tracked_package("tinycolor"));
        assert!(!is_tracked_package("@ctrl"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(is_tracked_package("chalk"));
        assert!(!is_tracked_package("Chalk"));
        assert!(!is_compromised_version("chalk", "5.6.1 "));
    }

    #[test]
    fn versions_are_not_normalized() {
        assert!(is_compromised_version("@ctrl/tinycolor", "4.1.1"));
        assert!(!is_compromised_version("@ctrl/tinycolor", "4.1.1.0"));
        assert!(!is_compromised_version("@ctrl/tinycolor", "v4.1.1"));
    }

    #[test]
    fn fingerprint_constant_is_lowercase_sha256_hex() {
        assert_eq!(MALICIOUS_BUNDLE_SHA256.len(), 64);
        assert!(MALICIOUS_BUNDLE_SHA256
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
