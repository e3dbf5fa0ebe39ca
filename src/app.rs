//! Pipeline orchestration module.
//!
//! This module composes the cluster listing, per-cluster service listing, and
//! batched service describe stages into one asynchronous scatter-gather run,
//! and owns the recovery boundary that turns any stage failure into the zero
//! summary.

use anyhow::Result;
use futures::future::join_all;
use tracing::{debug, error};

use crate::aws::{ClusterServices, EcsClient};
use crate::config::Config;
use crate::stats::{aggregate, ServiceStatus};

/// Main application container.
///
/// Ties the ECS client to the loaded configuration; the client is built once
/// here and threaded through every pipeline stage.
pub struct App {
    /// AWS ECS client for API calls
    pub ecs_client: EcsClient,
    /// Application configuration
    pub config: Config,
}

impl App {
    /// Creates the application, building the ECS client from the config's
    /// optional region/profile overrides.
    ///
    /// # Errors
    /// This function will return an error if AWS client initialization fails.
    pub async fn new(config: Config) -> Result<App> {
        let ecs_client =
            EcsClient::new(config.aws.region.clone(), config.aws.profile.clone()).await?;

        Ok(App { ecs_client, config })
    }

    /// Runs the census once, masking any failure into the zero summary.
    ///
    /// The caller always receives a value: on error the failure is logged
    /// and [`ServiceStatus::zero_summary`] is returned, so the printed
    /// output cannot distinguish "no Fargate services" from "the pipeline
    /// failed". [`App::fargate_summary`] keeps the typed result available
    /// for callers that need that distinction.
    pub async fn run(&self) -> ServiceStatus {
        match self.fargate_summary().await {
            Ok(summary) => summary,
            Err(err) => {
                error!("fargate census failed: {err:#}");
                ServiceStatus::zero_summary()
            }
        }
    }

    /// The discovery-and-aggregation pipeline.
    ///
    /// ListClusters feeds one concurrent ListServices call per cluster, whose
    /// joined results feed one concurrent batched DescribeServices call per
    /// cluster with a non-empty service set (empty sets are skipped - no
    /// call, no error). The flattened statuses are then reduced to the
    /// Fargate-only total.
    ///
    /// Sibling calls in each fan-out stage are issued together and joined
    /// all-or-nothing: every sibling is awaited, then the first error fails
    /// the whole stage and no partial results survive. With zero clusters
    /// the pipeline returns the zero summary without issuing any further
    /// API calls.
    ///
    /// # Errors
    /// This function will return an error if any underlying ECS call fails.
    pub async fn fargate_summary(&self) -> Result<ServiceStatus> {
        let clusters = self.ecs_client.list_clusters().await?;
        debug!("found {} clusters", clusters.len());

        let listings = join_all(
            clusters
                .iter()
                .map(|cluster| self.ecs_client.list_services(cluster)),
        )
        .await;
        let cluster_services: Vec<ClusterServices> =
            listings.into_iter().collect::<Result<_>>()?;

        let describes = join_all(
            cluster_services
                .iter()
                .filter(|set| !set.services.is_empty())
                .map(|set| self.ecs_client.describe_services(&set.cluster, &set.services)),
        )
        .await;
        let statuses: Vec<ServiceStatus> = describes
            .into_iter()
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();
        debug!("described {} services", statuses.len());

        Ok(aggregate(&statuses))
    }
}

#[cfg(test)]
mod tests {
    use crate::aws::ClusterServices;

    /// Mirrors the describe-stage predicate in `fargate_summary`
    fn describe_batches(sets: &[ClusterServices]) -> Vec<&ClusterServices> {
        sets.iter().filter(|set| !set.services.is_empty()).collect()
    }

    #[test]
    fn test_empty_service_sets_are_skipped() {
        let sets = vec![
            ClusterServices {
                cluster: "idle".to_string(),
                services: Vec::new(),
            },
            ClusterServices {
                cluster: "busy".to_string(),
                services: vec!["s1".to_string(), "s2".to_string()],
            },
        ];

        let batches = describe_batches(&sets);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].cluster, "busy");
        assert_eq!(batches[0].services.len(), 2);
    }

    #[test]
    fn test_no_clusters_means_no_describe_batches() {
        let batches = describe_batches(&[]);
        assert!(batches.is_empty());
    }

    #[test]
    fn test_batch_keeps_full_service_list() {
        // The whole batch goes into a single describe call per cluster
        let sets = vec![ClusterServices {
            cluster: "prod".to_string(),
            services: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }];

        let batches = describe_batches(&sets);
        assert_eq!(batches[0].services, vec!["a", "b", "c"]);
    }
}
