// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use kube::{
	api::{Api, DynamicObject, ListParams},
	core::GroupVersionKind,
	discovery::ApiResource,
	Client, Config, ResourceExt,
};
use tracing::{debug, instrument};

use crate::client::ClusterClient;
use crate::error::{K8sError, K8sResult};
use crate::types::{
	Node, SnapshotClass, StorageClass, SNAPSHOT_CLASS_KIND, SNAPSHOT_CLASS_PLURAL, SNAPSHOT_GROUP,
	SNAPSHOT_VERSION,
};

/// Production K8s client implementation using the kube crate.
pub struct KubeClient {
	client: Client,
}

impl KubeClient {
	/// Create a client from the pod's service account only.
	///
	/// Fails when not running inside a cluster.
	pub async fn in_cluster() -> K8sResult<Self> {
		let config = Config::incluster()?;
		let client = Client::try_from(config)?;
		debug!("K8s client initialized from in-cluster service account");
		Ok(Self { client })
	}

	/// Create a new KubeClient that auto-discovers cluster configuration.
	///
	/// This will attempt to load config from:
	/// 1. In-cluster service account (when running in K8s)
	/// 2. KUBECONFIG environment variable
	/// 3. ~/.kube/config
	pub async fn discover() -> K8sResult<Self> {
		let client = Client::try_default().await?;
		debug!("K8s client initialized");
		Ok(Self { client })
	}
}

fn snapshot_class_resource() -> ApiResource {
	let gvk = GroupVersionKind::gvk(SNAPSHOT_GROUP, SNAPSHOT_VERSION, SNAPSHOT_CLASS_KIND);
	ApiResource::from_gvk_with_plural(&gvk, SNAPSHOT_CLASS_PLURAL)
}

fn snapshot_class_from_dynamic(obj: &DynamicObject) -> SnapshotClass {
	let field = |key: &str| {
		obj
			.data
			.get(key)
			.and_then(|v| v.as_str())
			.map(str::to_string)
	};
	SnapshotClass {
		name: obj.name_any(),
		driver: field("driver").unwrap_or_default(),
		deletion_policy: field("deletionPolicy"),
	}
}

/// A 404 on a list means the resource type is not served, e.g. the snapshot
/// CRDs are not installed. Treat that as an empty listing.
fn empty_when_not_found<T>(listed: Result<Vec<T>, kube::Error>) -> K8sResult<Vec<T>> {
	match listed {
		Ok(items) => Ok(items),
		Err(kube::Error::Api(err)) if err.code == 404 => {
			debug!(reason = %err.reason, "resource type not served, treating as empty");
			Ok(Vec::new())
		}
		Err(e) => Err(e.into()),
	}
}

#[async_trait]
impl ClusterClient for KubeClient {
	#[instrument(skip(self))]
	async fn list_storage_classes(&self) -> K8sResult<Vec<StorageClass>> {
		let classes: Api<StorageClass> = Api::all(self.client.clone());
		let list = classes.list(&ListParams::default()).await?;
		debug!(count = list.items.len(), "listed storage classes");
		Ok(list.items)
	}

	#[instrument(skip(self))]
	async fn list_nodes(&self) -> K8sResult<Vec<Node>> {
		let nodes: Api<Node> = Api::all(self.client.clone());
		let list = nodes.list(&ListParams::default()).await?;
		debug!(count = list.items.len(), "listed nodes");
		Ok(list.items)
	}

	#[instrument(skip(self))]
	async fn list_volume_snapshot_classes(&self) -> K8sResult<Vec<SnapshotClass>> {
		let ar = snapshot_class_resource();
		let classes: Api<DynamicObject> = Api::all_with(self.client.clone(), &ar);
		let listed: Result<Vec<SnapshotClass>, _> = classes
			.list(&ListParams::default())
			.await
			.map(|list| list.items.iter().map(snapshot_class_from_dynamic).collect());
		let classes = empty_when_not_found(listed)?;
		debug!(count = classes.len(), "listed volume snapshot classes");
		Ok(classes)
	}
}
