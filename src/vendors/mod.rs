/// HTTP vendor speaking the AssemblyAI v2 REST API.
#[cfg(feature = "client")]
pub mod assemblyai;
