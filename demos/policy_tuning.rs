//! Load a tuned policy file and show how it changes validator behavior.

use resource_conventions::{check_data_retention, ComplianceFramework, ConventionPolicy};

#[tokio::main(flavor = "current_thread")]
async fn main() -> resource_conventions::Result<()> {
    let policy = match std::env::args().nth(1) {
        Some(path) => ConventionPolicy::from_file(path).await?,
        None => ConventionPolicy::default(),
    };

    println!("gdpr_max_retention_days = {}", policy.gdpr_max_retention_days);

    for days in [90, 200, 400, 3000] {
        let findings = check_data_retention(days, ComplianceFramework::Gdpr, &policy);
        if findings.is_empty() {
            println!("{days} days under GDPR: compliant");
        } else {
            for finding in findings {
                println!("{days} days under GDPR: [{}] {}", finding.severity, finding.message);
            }
        }
    }

    Ok(())
}
