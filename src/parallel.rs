//! Splitting row-major buffers across scoped worker threads.

use std::thread;

/// Number of threads to use for `rows` independent rows (at least one)
pub(crate) fn worker_count(rows: usize) -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(rows)
        .max(1)
}

/// Call `fill(row_index, row)` for every `row_len`-sized row of `buffer`
///
/// Contiguous runs of rows go to each worker; every row is visited exactly
/// once. A trailing partial row is passed as is.
pub(crate) fn for_each_row<T, F>(buffer: &mut [T], row_len: usize, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if buffer.is_empty() || row_len == 0 {
        return;
    }

    let rows = buffer.len().div_ceil(row_len);
    let rows_per_worker = rows.div_ceil(worker_count(rows));
    let fill = &fill;

    thread::scope(|s| {
        for (chunk_idx, chunk) in buffer.chunks_mut(row_len * rows_per_worker).enumerate() {
            let first_row = chunk_idx * rows_per_worker;
            s.spawn(move || {
                for (offset, row) in chunk.chunks_mut(row_len).enumerate() {
                    fill(first_row + offset, row);
                }
            });
        }
    });
}
