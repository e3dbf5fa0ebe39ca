//! AWS ECS integration module.
//!
//! This module provides a client wrapper for AWS ECS with the three read-only
//! operations the census pipeline consumes: listing clusters, listing the
//! services in a cluster, and fetching batched service descriptions.

use crate::stats::ServiceStatus;
use anyhow::Result;
use aws_sdk_ecs::types::Service;
use aws_sdk_ecs::Client;

/// Pairs one cluster with the ordered service names that belong to it.
///
/// Built once per pipeline run by the listing stage and consumed by the
/// describe stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterServices {
    /// Cluster name (not the full ARN)
    pub cluster: String,
    /// Service names in the order the listing call returned them
    pub services: Vec<String>,
}

/// Client for the read-only ECS operations used by the census pipeline.
///
/// Wraps the AWS SDK client; constructed once at process start and threaded
/// into the pipeline rather than read from ambient global state.
pub struct EcsClient {
    /// AWS ECS SDK client
    client: Client,
}

impl EcsClient {
    /// Creates a new ECS client with optional region and profile configuration.
    ///
    /// # Arguments
    /// * `region` - Optional AWS region override (e.g., "us-east-1")
    /// * `profile` - Optional AWS profile name from ~/.aws/credentials
    ///
    /// # Returns
    /// Returns a new `EcsClient` instance configured with the specified
    /// options. When neither is given, the SDK's default resolution chain
    /// (env vars, ~/.aws/config) applies.
    ///
    /// # Errors
    /// This function will return an error if AWS SDK initialization fails.
    pub async fn new(region: Option<String>, profile: Option<String>) -> Result<Self> {
        let mut config_loader = aws_config::from_env();

        // Set region if provided
        if let Some(region_str) = region {
            config_loader = config_loader.region(aws_config::Region::new(region_str));
        }

        // Set profile if provided
        if let Some(profile_name) = profile {
            config_loader = config_loader.profile_name(profile_name);
        }

        let config = config_loader.load().await;
        Ok(Self {
            client: Client::new(&config),
        })
    }

    /// Lists all ECS clusters in the configured region.
    ///
    /// Returns cluster names extracted from the full ARNs, in the order the
    /// API returned them. If no clusters exist (or the response carries no
    /// ARNs), returns an empty vector rather than an error.
    ///
    /// # Errors
    /// This function will return an error if the AWS ListClusters call fails
    /// due to network or permission issues.
    pub async fn list_clusters(&self) -> Result<Vec<String>> {
        let resp = self.client.list_clusters().send().await?;

        let clusters = resp
            .cluster_arns()
            .iter()
            .map(|arn| name_from_arn(arn).to_string())
            .collect();

        Ok(clusters)
    }

    /// Lists the service names in a specific ECS cluster.
    ///
    /// Extracts names from the returned service ARNs the same way
    /// [`EcsClient::list_clusters`] does and pairs them with the cluster. A
    /// cluster with no services yields an empty (but valid) set.
    ///
    /// # Arguments
    /// * `cluster` - The cluster name or ARN
    ///
    /// # Errors
    /// This function will return an error if:
    /// - The AWS ListServices call fails
    /// - The cluster doesn't exist
    pub async fn list_services(&self, cluster: &str) -> Result<ClusterServices> {
        let resp = self.client.list_services().cluster(cluster).send().await?;

        let services = resp
            .service_arns()
            .iter()
            .map(|arn| name_from_arn(arn).to_string())
            .collect();

        Ok(ClusterServices {
            cluster: cluster.to_string(),
            services,
        })
    }

    /// Fetches task-count statistics for a batch of services in one cluster.
    ///
    /// Issues a single DescribeServices call carrying the entire batch, never
    /// one call per service. Every returned entry is mapped through the
    /// defaulting rules:
    /// a missing service name or launch type becomes "unknown", and the SDK
    /// already defaults absent counts to 0. A response with no service
    /// entries yields an empty vector, not an error.
    ///
    /// # Arguments
    /// * `cluster` - The cluster name or ARN
    /// * `services` - Service names to describe; the caller is expected to
    ///   skip the call entirely for an empty batch
    ///
    /// # Errors
    /// This function will return an error if the AWS DescribeServices call
    /// fails or the cluster doesn't exist.
    pub async fn describe_services(
        &self,
        cluster: &str,
        services: &[String],
    ) -> Result<Vec<ServiceStatus>> {
        let resp = self
            .client
            .describe_services()
            .cluster(cluster)
            .set_services(Some(services.to_vec()))
            .send()
            .await?;

        Ok(resp.services().iter().map(service_status_from).collect())
    }
}

/// Extracts the resource name from a fully-qualified ARN.
///
/// Takes the segment after the final `/`; a value without a separator maps
/// to itself, so plain names pass through unchanged.
fn name_from_arn(arn: &str) -> &str {
    arn.split('/').next_back().unwrap_or(arn)
}

/// Maps one SDK service entry to a [`ServiceStatus`].
fn service_status_from(service: &Service) -> ServiceStatus {
    ServiceStatus {
        service_name: service.service_name().unwrap_or("unknown").to_string(),
        desired_count: service.desired_count(),
        running_count: service.running_count(),
        pending_count: service.pending_count(),
        launch_type: service
            .launch_type()
            .map(|lt| lt.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}
