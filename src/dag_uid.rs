use std::cell::Cell;
use std::thread_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RxGraphUid(usize);

thread_local! {
    static RX_GRAPH_UID: Cell<usize> = Cell::new(0);
}

impl RxGraphUid {
    pub(crate) fn next() -> RxGraphUid {
        RX_GRAPH_UID.with(|uid_cell| {
            let uid = uid_cell.get() + 1;
            uid_cell.set(uid);
            RxGraphUid(uid)
        })
    }
}
