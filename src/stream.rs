use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("empty stream")]
pub struct EmptyStreamError;

/// A deferred computation of the rest of a stream.
///
/// Forcing never caches: every call to [`Thunk::force`] runs the closure again
/// and may hand back a freshly built stream. Clones share the same closure.
pub struct Thunk<A: 'static>(Rc<dyn Fn() -> Stream<A> + 'static>);

impl<A: 'static> Thunk<A> {
    pub fn new<F: Fn() -> Stream<A> + 'static>(function: F) -> Thunk<A> {
        Thunk(Rc::new(function))
    }

    pub fn force(&self) -> Stream<A> {
        (self.0)()
    }
}

impl<A: 'static> Clone for Thunk<A> {
    fn clone(&self) -> Self {
        Thunk(Rc::clone(&self.0))
    }
}

#[derive(Clone)]
pub enum Stream<A: 'static> {
    Empty,
    Node(A, Thunk<A>),
}

impl<A: 'static> Stream<A> {
    #[allow(dead_code)]
    pub fn empty() -> Stream<A> {
        Stream::Empty
    }

    pub fn cons<F: Fn() -> Stream<A> + 'static>(head: A, rest: F) -> Stream<A> {
        Stream::Node(head, Thunk::new(rest))
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        matches!(self, Stream::Empty)
    }

    #[allow(dead_code)]
    pub fn rest(&self) -> Result<Stream<A>, EmptyStreamError> {
        match self {
            Stream::Empty => Err(EmptyStreamError),
            Stream::Node(_, rest) => Ok(rest.force()),
        }
    }

    #[allow(dead_code)]
    pub fn to_vec(self) -> Vec<A> {
        self.into_iter().collect()
    }
}

impl<A: Clone + 'static> Stream<A> {
    #[allow(dead_code)]
    pub fn first(&self) -> Result<A, EmptyStreamError> {
        match self {
            Stream::Empty => Err(EmptyStreamError),
            Stream::Node(head, _) => Ok(head.clone()),
        }
    }

    /// Runs `action` on every element in order. Never returns for infinite
    /// streams, so bound them with [`Stream::take`] first.
    #[allow(dead_code)]
    pub fn for_each<F: FnMut(A)>(&self, mut action: F) {
        let mut cell = self.clone();
        while let Stream::Node(head, rest) = cell {
            action(head);
            cell = rest.force();
        }
    }

    pub fn try_for_each<E, F: FnMut(A) -> Result<(), E>>(&self, mut action: F) -> Result<(), E> {
        let mut cell = self.clone();
        while let Stream::Node(head, rest) = cell {
            action(head)?;
            cell = rest.force();
        }
        Ok(())
    }

    /// Only the head is mapped eagerly, the rest is mapped when forced.
    #[allow(dead_code)]
    pub fn map<B: 'static, F: Fn(A) -> B + 'static>(&self, function: F) -> Stream<B> {
        map_shared(self, Rc::new(function))
    }

    pub fn take(&self, n: usize) -> Stream<A> {
        match self {
            Stream::Node(head, rest) if n > 0 => {
                let rest = rest.clone();
                Stream::cons(head.clone(), move || {
                    if n == 1 {
                        Stream::Empty
                    } else {
                        rest.force().take(n - 1)
                    }
                })
            }
            _ => Stream::Empty,
        }
    }
}

fn map_shared<A: Clone + 'static, B: 'static>(
    stream: &Stream<A>,
    function: Rc<dyn Fn(A) -> B>,
) -> Stream<B> {
    match stream {
        Stream::Empty => Stream::Empty,
        Stream::Node(head, rest) => {
            let head = function(head.clone());
            let rest = rest.clone();
            Stream::cons(head, move || map_shared(&rest.force(), Rc::clone(&function)))
        }
    }
}

impl<A: fmt::Debug + 'static> fmt::Debug for Stream<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stream::Empty => write!(formatter, "Empty"),
            Stream::Node(head, _) => write!(formatter, "Node({:?}, ..)", head),
        }
    }
}

impl<A: Clone + 'static> From<Vec<A>> for Stream<A> {
    fn from(elements: Vec<A>) -> Self {
        from_shared(Rc::from(elements), 0)
    }
}

fn from_shared<A: Clone + 'static>(elements: Rc<[A]>, index: usize) -> Stream<A> {
    let head = match elements.get(index) {
        Some(head) => head.clone(),
        None => return Stream::Empty,
    };
    Stream::cons(head, move || from_shared(Rc::clone(&elements), index + 1))
}

impl<A: 'static> IntoIterator for Stream<A> {
    type Item = A;
    type IntoIter = StreamIterator<A>;
    fn into_iter(self) -> StreamIterator<A> {
        StreamIterator {
            current: self,
            pending: None,
        }
    }
}

/// Forces the rest of a node only once the following element is requested.
pub struct StreamIterator<A: 'static> {
    current: Stream<A>,
    pending: Option<Thunk<A>>,
}

impl<A: 'static> Iterator for StreamIterator<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        if let Some(rest) = self.pending.take() {
            self.current = rest.force();
        }
        match std::mem::replace(&mut self.current, Stream::Empty) {
            Stream::Empty => None,
            Stream::Node(head, rest) => {
                self.pending = Some(rest);
                Some(head)
            }
        }
    }
}

#[macro_export]
macro_rules! stream {
    ($($x:expr),* $(,)?) => {
        $crate::stream::Stream::from(vec![$($x),*])
    };
}
