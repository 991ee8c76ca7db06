//! 并查集
//!
//! 路径压缩的 `find` 加按秩合并，供 Kruskal 使用。
//! `parent` 数组会随每个步骤一起拷贝，所以对外只读暴露。

/// 并查集森林
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    /// 每个元素自成一个集合
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// 查找根，并把路径上的节点直接挂到根下
    pub fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = element;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// 合并两个集合；已经在同一集合时返回 `false`
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }

    pub fn parent(&self) -> &[usize] {
        &self.parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_are_disjoint() {
        let mut sets = UnionFind::new(3);
        assert_eq!(sets.parent(), &[0, 1, 2]);
        assert_ne!(sets.find(0), sets.find(1));
    }

    #[test]
    fn test_union_and_find() {
        let mut sets = UnionFind::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert_eq!(sets.find(0), sets.find(1));
        assert_ne!(sets.find(1), sets.find(2));

        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn test_union_by_rank_keeps_taller_root() {
        let mut sets = UnionFind::new(3);
        sets.union(0, 1); // 0 成为秩为 1 的根
        sets.union(2, 0); // 2 秩为 0，挂到 0 下
        assert_eq!(sets.parent()[2], 0);
    }

    #[test]
    fn test_path_compression() {
        let mut sets = UnionFind::new(5);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(0, 2); // 2 的根挂到 0 下，3 仍指向 2
        assert_eq!(sets.parent()[3], 2);
        let root = sets.find(3);
        assert_eq!(root, 0);
        assert_eq!(sets.parent()[3], 0);
    }
}
