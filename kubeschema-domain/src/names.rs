use kubeschema_types::Definitions;

/// Vendor prefixes stripped from raw definition names, checked in this order.
pub const KNOWN_PREFIXES: [&str; 4] = [
    "io.k8s.api.",
    "io.k8s.",
    "apimachinery.pkg.apis.",
    "kubernetes.pkg.",
];

/// `io.k8s.api.core.v1.Pod` -> `core/v1/Pod`.
///
/// At most one prefix is removed (the first that matches), then every `.` becomes `/`.
pub fn to_display_name(raw: &str) -> String {
    let stripped = KNOWN_PREFIXES
        .iter()
        .find_map(|prefix| raw.strip_prefix(prefix))
        .unwrap_or(raw);
    stripped.replace('.', "/")
}

/// Display names of every definition, sorted ascending.
pub fn list_display_names(definitions: &Definitions) -> Vec<String> {
    let mut names: Vec<String> = definitions.keys().map(|k| to_display_name(k)).collect();
    names.sort();
    names
}

/// Best-effort inverse of [`to_display_name`].
///
/// Probes `<prefix><dotted>` for each known prefix, then the bare dotted form, and returns the first
/// key present in `definitions`. When two raw keys collapse onto the same display name the first
/// probe hit wins, which is not necessarily the key the display name was produced from.
pub fn to_raw_name(display: &str, definitions: &Definitions) -> Option<String> {
    let dotted = display.replace('/', ".");
    KNOWN_PREFIXES
        .iter()
        .map(|prefix| format!("{prefix}{dotted}"))
        .chain(std::iter::once(dotted.clone()))
        .find(|candidate| definitions.contains_key(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeschema_types::RawDefinition;

    fn defs(keys: &[&str]) -> Definitions {
        keys.iter()
            .map(|k| (k.to_string(), RawDefinition::default()))
            .collect()
    }

    #[test]
    fn strips_first_matching_prefix_only() {
        assert_eq!(to_display_name("io.k8s.api.core.v1.Pod"), "core/v1/Pod");
        assert_eq!(
            to_display_name("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"),
            "apimachinery/pkg/apis/meta/v1/ObjectMeta"
        );
        assert_eq!(
            to_display_name("apimachinery.pkg.apis.meta.v1.Time"),
            "meta/v1/Time"
        );
        assert_eq!(
            to_display_name("kubernetes.pkg.api.v1.Thing"),
            "api/v1/Thing"
        );
    }

    #[test]
    fn unknown_prefix_only_swaps_dots() {
        assert_eq!(
            to_display_name("com.example.v1.Widget"),
            "com/example/v1/Widget"
        );
        assert_eq!(to_display_name("Plain"), "Plain");
    }

    #[test]
    fn list_display_names_is_sorted() {
        let d = defs(&[
            "io.k8s.api.core.v1.Pod",
            "io.k8s.api.apps.v1.Deployment",
            "io.k8s.api.batch.v1.Job",
        ]);
        assert_eq!(
            list_display_names(&d),
            vec!["apps/v1/Deployment", "batch/v1/Job", "core/v1/Pod"]
        );
    }

    #[test]
    fn to_raw_name_probes_prefixes_in_order() {
        let d = defs(&[
            "io.k8s.api.core.v1.Pod",
            "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta",
            "kubernetes.pkg.api.v1.Thing",
            "Plain",
        ]);
        assert_eq!(
            to_raw_name("core/v1/Pod", &d).as_deref(),
            Some("io.k8s.api.core.v1.Pod")
        );
        assert_eq!(
            to_raw_name("apimachinery/pkg/apis/meta/v1/ObjectMeta", &d).as_deref(),
            Some("io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta")
        );
        assert_eq!(
            to_raw_name("api/v1/Thing", &d).as_deref(),
            Some("kubernetes.pkg.api.v1.Thing")
        );
        assert_eq!(to_raw_name("Plain", &d).as_deref(), Some("Plain"));
    }

    #[test]
    fn to_raw_name_reports_not_found() {
        let d = defs(&["io.k8s.api.core.v1.Pod"]);
        assert_eq!(to_raw_name("core/v1/Service", &d), None);
    }

    #[test]
    fn ambiguous_display_name_resolves_to_first_probe() {
        // Both collapse to "core/v1/Pod".
        let d = defs(&["io.k8s.core.v1.Pod", "io.k8s.api.core.v1.Pod"]);
        assert_eq!(to_display_name("io.k8s.core.v1.Pod"), "core/v1/Pod");
        assert_eq!(
            to_raw_name("core/v1/Pod", &d).as_deref(),
            Some("io.k8s.api.core.v1.Pod")
        );
    }
}
