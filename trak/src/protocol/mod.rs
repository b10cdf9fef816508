/*!
 * Protocol layer — data structures, constants, and credential handling.
 *
 * Everything related to *what* we send to the trak.io API:
 * - `types` — request envelope, per-operation payloads, aliases, properties
 * - `constants` — API host, endpoint paths, client version
 * - `credential` — API key resolution and base URL normalization
 */

pub mod constants;
pub mod credential;
pub mod types;
