//! Shared fixtures for router tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use ytgrab_axum::{AppContext, AppState};
use ytgrab_core::{InMemoryJobStore, Job, JobId, JobStatus, JobStore};
use ytgrab_download::{DownloadError, DownloadedFile, MediaDownloader, SupervisorConfig};

/// How the fake downloader behaves.
#[derive(Clone, Copy)]
pub enum Behaviour {
    /// Write `<dir>/Clip-<id>.mp4` and succeed.
    Succeed,
    /// Exit like yt-dlp with an error.
    Fail,
    /// Never finish.
    Hang,
}

pub struct FakeDownloader {
    pub dir: PathBuf,
    pub behaviour: Behaviour,
}

#[async_trait]
impl MediaDownloader for FakeDownloader {
    async fn update(&self) -> Result<(), DownloadError> {
        Ok(())
    }

    async fn download(&self, job_id: &JobId, _url: &str) -> Result<DownloadedFile, DownloadError> {
        match self.behaviour {
            Behaviour::Succeed => {
                let path = self.dir.join(format!("Clip-{job_id}.mp4"));
                tokio::fs::write(&path, b"fake video bytes").await?;
                Ok(DownloadedFile::from_path(path))
            }
            Behaviour::Fail => Err(DownloadError::ProcessFailed {
                code: Some(1),
                stderr: "ERROR: Unsupported URL".to_string(),
            }),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryJobStore>,
    pub dir: tempfile::TempDir,
}

pub fn app(behaviour: Behaviour) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(InMemoryJobStore::new());
    let downloader = Arc::new(FakeDownloader {
        dir: dir.path().to_path_buf(),
        behaviour,
    });
    let ctx = AppContext::new(store.clone(), downloader, SupervisorConfig::new());
    TestApp {
        state: Arc::new(ctx),
        store,
        dir,
    }
}

pub async fn wait_for(store: &InMemoryJobStore, id: &JobId, status: JobStatus) -> Job {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let job = store.get(id).await.unwrap();
            if job.status() == status {
                return job;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("job {id} never reached {status}"))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
