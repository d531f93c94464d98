//! Name, tag, and validate a small resource group.

use resource_conventions::{
    check_encryption, check_port, full_tags, name, validate, validator, ConventionPolicy,
    Environment, Identity, OptionalTagAttrs, ResourceKind, Service, SystemClock, ValidatorFn,
};

struct BucketConfig {
    enable_encryption: bool,
    port: u32,
}

fn main() -> resource_conventions::Result<()> {
    let identity = Identity::new("dso", Environment::Prod, Service::Data)?;

    let bucket = name(&identity, ResourceKind::ObjectStore, "ingestion", None)?;
    let queue = name(&identity, ResourceKind::Queue { fifo: true }, "processing", None)?;
    println!("bucket: {bucket}");
    println!("queue:  {queue}");

    let tags = full_tags(
        &identity,
        "data-team",
        "CC-4242",
        "ingestion",
        "loader",
        &OptionalTagAttrs::default(),
        &SystemClock,
    );
    for (key, value) in &tags {
        println!("tag {key} = {value}");
    }

    let policy = ConventionPolicy::default();
    let validators: Vec<ValidatorFn<BucketConfig>> = vec![
        validator(|cfg: &BucketConfig| Ok(check_encryption(cfg.enable_encryption, Environment::Prod))),
        validator(move |cfg: &BucketConfig| Ok(check_port(cfg.port, &policy))),
    ];

    let config = BucketConfig {
        enable_encryption: false,
        port: 80,
    };
    let report = validate(&bucket, &config, &validators);

    println!("overall: {}", if report.overall_status() { "PASS" } else { "FAIL" });
    for finding in &report.findings {
        println!("[{}] {}", finding.severity, finding.message);
    }

    Ok(())
}
