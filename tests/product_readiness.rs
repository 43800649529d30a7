#[test]
fn config_defaults_are_stable() {
    let cfg = qrgo::config::AppConfig::from_env();
    assert!(!cfg.database_url.is_empty());
    assert!(!cfg.storage_bucket.is_empty());
    assert!(cfg.events_cache_ttl_secs > 0);
}

#[test]
fn api_surface_is_documented_in_readme() {
    let readme = std::fs::read_to_string("README.md").unwrap_or_default();
    assert!(readme.contains("/ops/readiness"));
    assert!(readme.contains("/ops/liveness"));
    assert!(readme.contains("/scan/check-in"));
    assert!(readme.contains("/admin/events/:event_id/advance-status"));
    assert!(readme.contains("ORGANIZERS_JSON"));
}
