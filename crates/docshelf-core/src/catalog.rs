//! Catalog source: the fixed, ordered list of document identifiers.

use std::collections::HashSet;

use crate::error::CatalogError;

/// The built-in article collection, in catalog order.
pub const BUILTIN_IDENTIFIERS: &[&str] = &[
    "15 Open-Source Projects That Changed the World.htm",
    "6 More Microservices Interview Questions.htm",
    "7 Microservices Interview Questions.htm",
    "A Brief History of Scaling Netflix.htm",
    "A Crash Course in API Versioning Strategies.htm",
    "A Crash Course in Caching - Final Part.htm",
    "A Crash Course in Caching - Part 1.htm",
    "A Crash Course in Caching - Part 2.htm",
    "A Crash Course in CICD.htm",
    "A Crash Course in Database Scaling Strategies.htm",
    "A Crash Course in Database Sharding.htm",
    "A Crash Course in DNS (Domain Name System).htm",
    "A Crash Course in Docker.htm",
    "A Crash Course in GraphQL.htm",
    "A Crash Course in IPv4 Addressing.htm",
    "A Crash Course in Kubernetes.htm",
    "A Crash Course in Networking.htm",
    "A Crash Course in Redis.htm",
    "A Crash Course on Architectural Scalability.htm",
    "A Crash Course on Cell-based Architecture.htm",
    "A Crash Course on Content-Delivery Networks (CDN).htm",
    "A Crash Course on Distributed Systems.htm",
    "A Crash Course on Domain-Driven Design.htm",
    "A Crash Course on Load Balancers for Scaling.htm",
    "A Crash Course on Microservice Communication Patterns.htm",
    "A Crash Course on Microservices Design Patterns.htm",
    "A Crash Course on Relational Database Design.htm",
    "A Crash Course on REST APIs.htm",
    "A Crash Course on Scaling the API Layer.htm",
    "A Crash Course on Scaling the Data Layer.htm",
    "A Deep Dive into HTTP - From HTTP 1 to HTTP 3.htm",
    "A Detailed Guide to Content Delivery Networks.htm",
    "A Guide to Database Replication - Key Concepts and Strategies.htm",
    "A Guide to Database Sharding - Key Strategies.htm",
    "A Guide to Database Transactions - From ACID to Concurrency Control.htm",
    "A Guide to Rate Limiting Strategies.htm",
    "A Guide to Top Caching Strategies.htm",
    "A Pattern Every Modern Developer Should Know - CQRS.htm",
    "API Gateway vs Service Mesh - Which One Do You Need.htm",
    "API Gateway.htm",
    "API Protocols 101 - A Guide to Choose the Right One.htm",
    "API redesign - shopping cart and Stripe payment.htm",
    "API Security Best Practices.htm",
    "CAP, PACELC, ACID, BASE - Essential Concepts for an Architect's Toolkit.htm",
    "Capacity Planning.htm",
    "Clean Architecture 101 - Building Software That Lasts.htm",
    "Common Failure Causes.htm",
    "Consistency and Partition Tolerance - Understanding CAP vs PACELC.htm",
    "Consistent Hashing 101 - How Modern Systems Handle Growth and Failure.htm",
    "Coupling and Cohesion - The Two Principles for Effective Architecture.htm",
    "Dark Side of Distributed Systems - Latency and Partition Tolerance.htm",
    "Data Replication - A Key Component for Building Large-Scale Distributed Systems.htm",
    "Data Sharing Between Microservices.htm",
    "Database Index Internals - Understanding the Data Structures.htm",
    "Database Indexing Demystified - Index Types and Use-Cases.htm",
    "Database Indexing Strategies - Part 2.htm",
    "Database Indexing Strategies.htm",
    "Database Performance Demystified - Essential Tips and Strategies.htm",
    "Database Schema Design Simplified - Normalization vs Denormalization.htm",
    "Design Effective and Secure REST APIs.htm",
    "Distributed Caching - The Secret to High-Performance Applications.htm",
    "Does Serverless Have Servers.htm",
    "Domain-Driven Design (DDD) Demystified.htm",
    "Embracing Chaos to Improve System Resilience - Chaos Engineering.htm",
    "Engineering Trade-offs - Eventual Consistency in Practice.htm",
    "EP68 - Top architectural styles.htm",
    "Event-Driven Architectural Patterns.htm",
    "Everything You Always Wanted to Know About TCP But Too Afraid to Ask.htm",
    "Factors to Consider in Database Selection.htm",
    "From 0 to Millions - A Guide to Scaling Your App - Final Part.htm",
    "From 0 to Millions - A Guide to Scaling Your App - Part 1.htm",
    "From 0 to Millions - A Guide to Scaling Your App - Part 2.htm",
    "From 0 to Millions - A Guide to Scaling Your App - Part 3.htm",
    "From Monolith to Microservices - Key Transition Patterns.htm",
    "Good Code vs. Bad Code.htm",
    "GraphQL 101 - API Approach Beyond REST.htm",
    "How do We Design for High Availability.htm",
    "How to Build a Smart Chatbot in 10 mins with LangChain.htm",
    "How to Choose a Message Queue - Kafka vs. RabbitMQ.htm",
    "How to Choose a Replication Strategy.htm",
    "How to Design a Good API.htm",
    "How Video Recommendations Work - Part 1.htm",
    "HTTP1 vs HTTP2 vs HTTP3 - A Deep Dive.htm",
    "I Was Under Leveled!  Avoiding the Tragedy of Making Only $500k a Year.htm",
    "Infrastructure as Code.htm",
    "Key Steps in the Database Selection Process.htm",
    "Kubernetes - When and How to Apply It.htm",
    "Kubernetes Made Easy - A Beginner's Roadmap to Container Orchestration.htm",
    "Mastering Data Consistency Across Microservices.htm",
    "Mastering Design Principles - SOLID.htm",
    "Mastering Idempotency - Building Reliable APIs.htm",
    "Mastering Modern Authentication - Cookies, Sessions, JWT, and PASETO.htm",
    "Mastering OOP Fundamentals with SOLID Principles.htm",
    "Mastering the Art of API Design.htm",
    "Messaging Patterns Explained - Pub-Sub, Queues, and Event Streams.htm",
    "Monolith vs Microservices vs Modular Monoliths - What's the Right Choice.htm",
    "Netflix - What Happens When You Press Play - Part 2.htm",
    "Netflix - What Happens When You Press Play.htm",
    "Network Protocols behind Server Push, Online Gaming, and Emails.htm",
    "Network Protocols Run the Internet.htm",
    "No More Vendor Lock-In - The Rise of Sky Computing.htm",
    "Non-Functional Requirements - The Backbone of Great Software - Part 1.htm",
    "Non-Functional Requirements - The Backbone of Great Software - Part 2.htm",
    "OOP Design Patterns and Anti-Patterns - What Works and What Fails.htm",
    "Password, Session, Cookie, Token, JWT, SSO, OAuth - Authentication Explained - Part 1.htm",
    "Password, Session, Cookie, Token, JWT, SSO, OAuth - Authentication Explained - Part 2.htm",
    "Rate Limiter For The Real World.htm",
    "Rate Limiting Fundamentals.htm",
    "Redis Can Do More Than Caching.htm",
    "Shipping to Production.htm",
    "Software Architecture Patterns.htm",
    "Speedrunning Guide - Junior to Staff Engineer in 3 years.htm",
    "SQL vs NoSQL - Choosing the Right Database for An Application.htm",
    "Stateless Architecture - The Key to Building Scalable and Resilient Systems.htm",
    "Synchronous vs Asynchronous Communication - When to Use What.htm",
    "The 6 Most Impactful Ways Redis is Used in Production Systems.htm",
    "The Art of REST API Design - Idempotency, Pagination, and Security.htm",
    "The Saga Pattern.htm",
    "The Sidecar Pattern Explained - Decoupling Operational Features.htm",
    "The Tech Promotion Algorithm - A Structured Guide to Moving Up.htm",
    "The Top 3 Resume Mistakes Costing You the Job.htm",
    "Tidying Code.htm",
    "Top Leader Election Algorithms in Distributed Databases.htm",
    "Top Scalability Strategies for Real-World Load.htm",
    "Top Strategies to Improve Reliability in Distributed Systems.htm",
    "Top Strategies to Reduce Latency.htm",
    "Understanding Database Types.htm",
    "Understanding Load Balancers - Traffic Management at Scale.htm",
    "Understanding Message Queues.htm",
    "Unlock Highly Relevant Search with AI.htm",
    "Unlocking the Power of SQL Queries for Improved Performance.htm",
    "Virtualization and Containerization - Which one to pick.htm",
    "What Happens When a SQL is Executed.htm",
    "Why Do We Need a Message Queue.htm",
    "Why Executives Seem Out of Touch, and How to Reach Them.htm",
    "Why is Kafka so fast - How does it work.htm",
    "Why the Internet Is Both Robust and Fragile.htm",
];

/// An ordered list of unique document identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    identifiers: Vec<String>,
}

impl Catalog {
    /// Build a catalog from an ordered list of identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyIdentifier`] for blank entries and
    /// [`CatalogError::DuplicateIdentifier`] if an identifier repeats.
    pub fn new<I, S>(identifiers: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(identifiers.len());
        for (pos, id) in identifiers.iter().enumerate() {
            if id.trim().is_empty() {
                return Err(CatalogError::EmptyIdentifier(pos));
            }
            if !seen.insert(id.as_str()) {
                return Err(CatalogError::DuplicateIdentifier(id.clone()));
            }
        }
        Ok(Self { identifiers })
    }

    /// The built-in collection.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            identifiers: BUILTIN_IDENTIFIERS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), 137);
        // Re-validating the built-in list must succeed.
        let validated = Catalog::new(BUILTIN_IDENTIFIERS.iter().copied()).unwrap();
        assert_eq!(validated, builtin);
        assert!(builtin.contains("API Gateway.htm"));
    }

    #[test]
    fn rejects_duplicates() {
        let err = Catalog::new(["a.htm", "b.htm", "a.htm"]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateIdentifier(id) if id == "a.htm"));
    }

    #[test]
    fn rejects_blank_identifiers() {
        let err = Catalog::new(["a.htm", "  "]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyIdentifier(1)));
    }

    #[test]
    fn preserves_order() {
        let catalog = Catalog::new(["z.htm", "a.htm"]).unwrap();
        assert_eq!(catalog.identifiers(), ["z.htm", "a.htm"]);
        assert!(!catalog.is_empty());
    }
}
