//! CloudFormation package publisher
//!
//! For every target: `aws cloudformation package` into the target's staging
//! bucket, rewrite the packaged `CodeUri` references so one template works
//! in every account and region, then upload the result to the template
//! bucket. Consecutive identical templates are uploaded once.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use regex::{Captures, Regex};

use crate::domain::entities::CredentialSet;
use crate::domain::ports::{
    ArtifactPublisher, DeployEvent, DeployEventSink, PublishError, PublishRequest,
    PublishedTemplate,
};
use crate::domain::value_objects::{ContentHash, Target};

use super::cli::AwsCli;

/// Where templates come from and go to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherSettings {
    /// Source template handed to `aws cloudformation package`
    pub template_file: PathBuf,
    /// File name of the packaged template inside the scratch directory
    pub packaged_file: String,
    /// Bucket that serves the final template
    pub template_bucket: String,
    /// Staging buckets are `<prefix>-<account>-<region>`
    pub artifact_bucket_prefix: String,
    /// Key prefix of packaged artifacts
    pub artifact_prefix: String,
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            template_file: PathBuf::from("cloudformation-stack-set.yml"),
            packaged_file: "cloudformation-stack-set-output.yml".to_string(),
            template_bucket: "stackfleet-stack-sets".to_string(),
            artifact_bucket_prefix: "stackfleet-deploy".to_string(),
            artifact_prefix: "cloudformation".to_string(),
        }
    }
}

impl PublisherSettings {
    pub fn staging_bucket(&self, target: &Target) -> String {
        format!(
            "{}-{}-{}",
            self.artifact_bucket_prefix, target.account, target.region
        )
    }

    pub fn template_url(&self, unit_name: &str) -> String {
        format!(
            "https://s3.amazonaws.com/{}/{}.yml",
            self.template_bucket, unit_name
        )
    }

    fn template_destination(&self, unit_name: &str) -> String {
        format!("s3://{}/{}.yml", self.template_bucket, unit_name)
    }
}

/// Replaces `CodeUri: s3://<prefix>-<account>-<region>/<key>` with a
/// reference that resolves to the deploying account and region
///
/// Only staging buckets match: the prefix followed by a 12-digit account id
/// and a region name. Other buckets, even ones sharing the prefix, are left
/// alone.
#[derive(Debug, Clone)]
pub struct CodeUriRewriter {
    pattern: Regex,
    replacement_bucket: String,
}

impl CodeUriRewriter {
    pub fn new(bucket_prefix: &str) -> Result<Self, PublishError> {
        let pattern = Regex::new(&format!(
            r#"CodeUri: s3://{}-[0-9]{{12}}-[a-z]{{2}}(?:-[a-z]+)+-[0-9]+/([^\s"']+)"#,
            regex::escape(bucket_prefix)
        ))
        .map_err(|e| PublishError::InvalidBucketPrefix {
            prefix: bucket_prefix.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            pattern,
            replacement_bucket: format!("{bucket_prefix}-${{AWS::AccountId}}-${{AWS::Region}}"),
        })
    }

    pub fn rewrite<'t>(&self, template: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(template, |caps: &Captures| {
            format!(
                "CodeUri: {{Bucket: !Sub \"{}\", Key: \"{}\"}}",
                self.replacement_bucket, &caps[1]
            )
        })
    }
}

pub struct CloudFormationPublisher {
    cli: AwsCli,
    settings: PublisherSettings,
}

impl CloudFormationPublisher {
    pub fn new(cli: AwsCli, settings: PublisherSettings) -> Self {
        Self { cli, settings }
    }
}

impl ArtifactPublisher for CloudFormationPublisher {
    fn publish(
        &self,
        request: &PublishRequest,
        credentials: &CredentialSet,
        events: &dyn DeployEventSink,
    ) -> Result<PublishedTemplate, PublishError> {
        let template_file = &self.settings.template_file;
        if !template_file.is_file() {
            return Err(PublishError::MissingTemplate(template_file.clone()));
        }

        let scratch = tempfile::tempdir()?;
        let packaged_path = scratch.path().join(&self.settings.packaged_file);
        let final_path = scratch.path().join(format!("{}.yml", request.unit_name));
        let destination = self.settings.template_destination(&request.unit_name);
        let uploader = self.cli.with_credentials(credentials);
        let rewriter = CodeUriRewriter::new(&self.settings.artifact_bucket_prefix)?;

        let mut published: Option<ContentHash> = None;
        let mut packaged_targets = Vec::new();
        let mut uploads = 0;

        for target in request.fleet.targets() {
            // Packaging runs as the caller; the upload uses the assumed role
            let packager = self.cli.clone().with_region(target.region.as_str());
            let bucket = self.settings.staging_bucket(&target);
            let args: [&OsStr; 10] = [
                OsStr::new("cloudformation"),
                OsStr::new("package"),
                OsStr::new("--template-file"),
                template_file.as_os_str(),
                OsStr::new("--output-template-file"),
                packaged_path.as_os_str(),
                OsStr::new("--s3-bucket"),
                OsStr::new(&bucket),
                OsStr::new("--s3-prefix"),
                OsStr::new(&self.settings.artifact_prefix),
            ];
            packager
                .run(args)
                .map_err(|e| PublishError::PackageFailed {
                    command: "aws cloudformation package".to_string(),
                    target: target.clone(),
                    message: e.to_string(),
                })?;
            events.on_event(DeployEvent::TargetPackaged {
                target: target.clone(),
            });

            let packaged = fs::read_to_string(&packaged_path)?;
            let rewritten = rewriter.rewrite(&packaged).into_owned();
            let digest = ContentHash::from_content(&rewritten);
            packaged_targets.push(target.clone());

            if published.as_ref() == Some(&digest) {
                events.on_event(DeployEvent::TemplateUnchanged { target });
                continue;
            }

            fs::write(&final_path, &rewritten)?;
            let args: [&OsStr; 4] = [
                OsStr::new("s3"),
                OsStr::new("cp"),
                final_path.as_os_str(),
                OsStr::new(&destination),
            ];
            uploader
                .run(args)
                .map_err(|e| PublishError::UploadFailed {
                    destination: destination.clone(),
                    message: e.to_string(),
                })?;
            uploads += 1;
            events.on_event(DeployEvent::TemplateUploaded {
                url: self.settings.template_url(&request.unit_name),
                digest: digest.to_string(),
            });
            published = Some(digest);
        }

        let digest = published.ok_or_else(|| PublishError::UploadFailed {
            destination,
            message: "fleet has no targets".to_string(),
        })?;
        Ok(PublishedTemplate {
            url: self.settings.template_url(&request.unit_name),
            digest,
            packaged_targets,
            uploads,
        })
    }
}
