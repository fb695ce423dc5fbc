//! Operator authentication

pub mod staff_auth;
