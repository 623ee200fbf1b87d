// Application layer: concrete pipelines wired from the domain ports.

pub mod pipelines;
