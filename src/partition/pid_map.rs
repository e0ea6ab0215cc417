//! Assignment of subdomains to processes

/// Assign subdomains to processes in contiguous blocks.
///
/// `min(parts, processes)` processes are used. Each gets `parts / active` consecutive
/// subdomains, and the lowest `parts % active` ranks get one extra. Processes beyond the
/// active ones own nothing. Returns the owning rank of every subdomain.
pub fn create_pid_map(parts: usize, processes: usize) -> Vec<usize> {
    let active = parts.min(processes);
    if active == 0 {
        return vec![];
    }
    let base = parts / active;
    let remainder = parts % active;
    let mut pid_map = Vec::with_capacity(parts);
    for p in 0..active {
        let count = base + usize::from(p < remainder);
        pid_map.extend(std::iter::repeat(p).take(count));
    }
    pid_map
}

/// Number of processes that own at least one subdomain
pub fn active_processes(pid_map: &[usize]) -> usize {
    pid_map.iter().max().map_or(0, |p| p + 1)
}
