//! Commuter-rail itinerary search server.
//!
//! Answers "how do I get from station A to station B on the suburban
//! network": direct trains, and connections with one change of train,
//! ranked against the rider's requested departure time.

pub mod cache;
pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
