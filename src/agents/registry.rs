//! Static agent registry.
//!
//! Maps each [`AgentId`] to the downstream service that implements it.
//! Built once at process start from [`Config`] and read-only afterwards.
//! One field per agent keeps the lookup total: a new agent variant will
//! not compile until it gets a descriptor here.

use crate::types::AgentId;
use crate::utils::config::Config;

/// HTTP method used to reach a downstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One downstream tutoring service.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub agent: AgentId,
    /// Base address of the service endpoint. For `progress` the user id is
    /// appended as a path segment.
    pub address: String,
    pub method: HttpMethod,
}

/// Registry of all downstream tutoring services.
pub struct AgentRegistry {
    triage: ServiceDescriptor,
    concepts: ServiceDescriptor,
    debug: ServiceDescriptor,
    exercise: ServiceDescriptor,
    progress: ServiceDescriptor,
    code_review: ServiceDescriptor,
}

impl AgentRegistry {
    /// Builds the registry from startup configuration.
    pub fn from_config(config: &Config) -> Self {
        let endpoints = &config.agents;
        Self {
            triage: ServiceDescriptor {
                agent: AgentId::Triage,
                address: endpoints.triage_url.clone(),
                method: HttpMethod::Post,
            },
            concepts: ServiceDescriptor {
                agent: AgentId::Concepts,
                address: endpoints.concepts_url.clone(),
                method: HttpMethod::Post,
            },
            debug: ServiceDescriptor {
                agent: AgentId::Debug,
                address: endpoints.debug_url.clone(),
                method: HttpMethod::Post,
            },
            exercise: ServiceDescriptor {
                agent: AgentId::Exercise,
                address: endpoints.exercise_url.clone(),
                method: HttpMethod::Post,
            },
            progress: ServiceDescriptor {
                agent: AgentId::Progress,
                address: endpoints.progress_url.clone(),
                method: HttpMethod::Get,
            },
            code_review: ServiceDescriptor {
                agent: AgentId::CodeReview,
                address: endpoints.code_review_url.clone(),
                method: HttpMethod::Post,
            },
        }
    }

    /// Looks up the descriptor for an agent. Total by construction.
    pub fn descriptor(&self, agent: AgentId) -> &ServiceDescriptor {
        match agent {
            AgentId::Triage => &self.triage,
            AgentId::Concepts => &self.concepts,
            AgentId::Debug => &self.debug,
            AgentId::Exercise => &self.exercise,
            AgentId::Progress => &self.progress,
            AgentId::CodeReview => &self.code_review,
        }
    }

    /// All descriptors, in [`AgentId::ALL`] order.
    pub fn descriptors(&self) -> Vec<&ServiceDescriptor> {
        AgentId::ALL.iter().map(|a| self.descriptor(*a)).collect()
    }
}
