//! Service task-count statistics and aggregation.
//!
//! This module defines the per-service status record produced by the describe
//! stage and the pure reduction that folds a flat collection of statuses into
//! a single Fargate-only total.

use serde::Serialize;
use std::fmt;

/// Launch type value that counts toward the aggregate total.
///
/// Comparison against it is exact and case-sensitive; "unknown", empty, and
/// differently-cased values are excluded.
pub const FARGATE: &str = "FARGATE";

/// Task-count statistics for a single ECS service.
///
/// One instance per service, produced by the describe stage. The summary
/// returned by [`aggregate`] reuses the same shape with
/// `service_name == "total"` and `launch_type == "FARGATE"`.
///
/// Serializes with camelCase field names for the JSON output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// Service name, or "unknown" if the API omitted it
    pub service_name: String,
    /// Number of tasks that should be running
    pub desired_count: i32,
    /// Number of tasks currently running
    pub running_count: i32,
    /// Number of tasks pending startup
    pub pending_count: i32,
    /// Launch type (FARGATE, EC2, EXTERNAL, or "unknown")
    pub launch_type: String,
}

impl ServiceStatus {
    /// The identity summary: zero counts under the fixed name "total" and
    /// launch type "FARGATE".
    ///
    /// This is both the starting accumulator of [`aggregate`] and the value
    /// the orchestrator substitutes when the pipeline fails.
    pub fn zero_summary() -> Self {
        Self {
            service_name: "total".to_string(),
            desired_count: 0,
            running_count: 0,
            pending_count: 0,
            launch_type: FARGATE.to_string(),
        }
    }

    /// Whether this service's tasks run on Fargate.
    pub fn is_fargate(&self) -> bool {
        self.launch_type == FARGATE
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Service: {}", self.service_name)?;
        writeln!(f, "Launch Type: {}", self.launch_type)?;
        writeln!(f, "Desired Count: {}", self.desired_count)?;
        writeln!(f, "Running Count: {}", self.running_count)?;
        write!(f, "Pending Count: {}", self.pending_count)
    }
}

/// Reduces a flat collection of service statuses into one summary.
///
/// Starts from [`ServiceStatus::zero_summary`] and adds the desired, running,
/// and pending counts of every entry whose launch type is exactly "FARGATE".
/// All other entries leave the accumulator untouched, so the result's counts
/// equal the field-wise sums over the Fargate entries alone.
///
/// Pure and synchronous; the sum is commutative, so input order does not
/// affect the result.
pub fn aggregate(statuses: &[ServiceStatus]) -> ServiceStatus {
    statuses
        .iter()
        .fold(ServiceStatus::zero_summary(), |total, status| {
            if status.is_fargate() {
                ServiceStatus {
                    desired_count: total.desired_count + status.desired_count,
                    running_count: total.running_count + status.running_count,
                    pending_count: total.pending_count + status.pending_count,
                    ..total
                }
            } else {
                total
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, desired: i32, running: i32, pending: i32, launch: &str) -> ServiceStatus {
        ServiceStatus {
            service_name: name.to_string(),
            desired_count: desired,
            running_count: running,
            pending_count: pending,
            launch_type: launch.to_string(),
        }
    }

    #[test]
    fn test_zero_summary_fields() {
        let summary = ServiceStatus::zero_summary();
        assert_eq!(summary.service_name, "total");
        assert_eq!(summary.launch_type, "FARGATE");
        assert_eq!(summary.desired_count, 0);
        assert_eq!(summary.running_count, 0);
        assert_eq!(summary.pending_count, 0);
    }

    #[test]
    fn test_aggregate_empty_input() {
        let summary = aggregate(&[]);
        assert_eq!(summary, ServiceStatus::zero_summary());
    }

    #[test]
    fn test_aggregate_sums_fargate_services() {
        let statuses = [
            status("api", 3, 3, 0, "FARGATE"),
            status("worker", 2, 1, 1, "FARGATE"),
        ];

        let summary = aggregate(&statuses);
        assert_eq!(summary.desired_count, 5);
        assert_eq!(summary.running_count, 4);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.service_name, "total");
        assert_eq!(summary.launch_type, "FARGATE");
    }

    #[test]
    fn test_aggregate_excludes_ec2_services() {
        // Mixed launch types - only the FARGATE entry counts
        let statuses = [
            status("s1", 2, 2, 0, "FARGATE"),
            status("s2", 1, 0, 1, "EC2"),
        ];

        let summary = aggregate(&statuses);
        assert_eq!(summary.desired_count, 2);
        assert_eq!(summary.running_count, 2);
        assert_eq!(summary.pending_count, 0);
    }

    #[test]
    fn test_aggregate_excludes_unknown_and_empty_launch_types() {
        let statuses = [
            status("s1", 4, 4, 0, "unknown"),
            status("s2", 7, 6, 1, ""),
            status("s3", 9, 9, 0, "EXTERNAL"),
        ];

        let summary = aggregate(&statuses);
        assert_eq!(summary, ServiceStatus::zero_summary());
    }

    #[test]
    fn test_aggregate_launch_type_is_case_sensitive() {
        let statuses = [status("s1", 5, 5, 0, "fargate")];

        let summary = aggregate(&statuses);
        assert_eq!(summary.desired_count, 0);
        assert_eq!(summary.running_count, 0);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let mut statuses = vec![
            status("a", 1, 1, 0, "FARGATE"),
            status("b", 2, 0, 2, "EC2"),
            status("c", 3, 2, 1, "FARGATE"),
        ];

        let forward = aggregate(&statuses);
        statuses.reverse();
        let backward = aggregate(&statuses);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_is_fargate() {
        assert!(status("s", 0, 0, 0, "FARGATE").is_fargate());
        assert!(!status("s", 0, 0, 0, "EC2").is_fargate());
        assert!(!status("s", 0, 0, 0, "unknown").is_fargate());
    }

    #[test]
    fn test_display_format() {
        let summary = status("total", 2, 2, 0, "FARGATE");
        let rendered = summary.to_string();

        assert!(rendered.contains("Service: total"));
        assert!(rendered.contains("Launch Type: FARGATE"));
        assert!(rendered.contains("Desired Count: 2"));
        assert!(rendered.contains("Running Count: 2"));
        assert!(rendered.contains("Pending Count: 0"));
    }

    #[test]
    fn test_json_serialization_uses_camel_case() {
        let summary = ServiceStatus::zero_summary();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["serviceName"], "total");
        assert_eq!(json["launchType"], "FARGATE");
        assert_eq!(json["desiredCount"], 0);
        assert_eq!(json["runningCount"], 0);
        assert_eq!(json["pendingCount"], 0);
    }
}
